use serde::Deserialize;

use super::{
    config::{RankingConfig, RankingConfigError},
    filter::{filter, FilterCriteria},
    pagination::{paginate, validate_page_request, Page, PaginationError, DEFAULT_PAGE_SIZE},
    scoring::{score_validated, ScoredCandidate},
    sort::{sort, SortKey},
};
use crate::Profile;

/// 一覧画面1回分の問い合わせ（絞り込み → 並べ替え → ページ切り出し）
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct RankQuery {
    pub criteria: FilterCriteria,
    pub sort: SortKey,
    pub page: usize,
    pub page_size: usize,
}

impl Default for RankQuery {
    fn default() -> Self {
        Self {
            criteria: FilterCriteria::default(),
            sort: SortKey::default(),
            page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

/// プロフィールのマッチングランカー
///
/// 設定は生成時に検証し、以降は読み取り専用。各操作は副作用のない純粋関数なので、
/// 複数スレッドから同じインスタンスを共有して呼び出してよい。
#[derive(Debug, Clone, Default)]
pub struct ProfileMatchRanker {
    config: RankingConfig,
}

impl ProfileMatchRanker {
    pub fn new(config: RankingConfig) -> Result<Self, RankingConfigError> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &RankingConfig {
        &self.config
    }

    // config は new() で検証済みなので再検証しない
    pub fn score(&self, requester: &Profile, candidate: &Profile) -> ScoredCandidate {
        score_validated(requester, candidate, &self.config)
    }

    pub fn score_all(&self, requester: &Profile, candidates: &[Profile]) -> Vec<ScoredCandidate> {
        candidates
            .iter()
            .map(|candidate| self.score(requester, candidate))
            .collect()
    }

    pub fn filter(
        &self,
        candidates: &[ScoredCandidate],
        criteria: &FilterCriteria,
    ) -> Vec<ScoredCandidate> {
        filter(candidates, criteria)
    }

    pub fn sort(&self, candidates: &[ScoredCandidate], key: SortKey) -> Vec<ScoredCandidate> {
        sort(candidates, key)
    }

    pub fn paginate(
        &self,
        candidates: &[ScoredCandidate],
        page: usize,
        page_size: usize,
    ) -> Result<Page<ScoredCandidate>, PaginationError> {
        paginate(candidates, page, page_size)
    }

    /// 採点 → 絞り込み → 並べ替え → ページ切り出しを通しで行う
    ///
    /// 依頼者本人（同じ id）は候補から除く。ページ指定が不正なら採点前にエラーを返す。
    pub fn rank(
        &self,
        requester: &Profile,
        candidates: &[Profile],
        query: &RankQuery,
    ) -> Result<Page<ScoredCandidate>, PaginationError> {
        validate_page_request(query.page, query.page_size)?;

        let scored: Vec<ScoredCandidate> = candidates
            .iter()
            .filter(|candidate| candidate.id != requester.id)
            .map(|candidate| self.score(requester, candidate))
            .collect();
        let filtered = self.filter(&scored, &query.criteria);
        let sorted = self.sort(&filtered, query.sort);
        self.paginate(&sorted, query.page, query.page_size)
    }
}
