use serde::Serialize;

use super::{
    config::{RankingConfig, RankingConfigError},
    weights::MAX_SCORE,
};
use crate::{connections::ConnectionStatus, Profile};

/// スコア計算済みの候補者
///
/// スコア計算のたびに新しく作られ、作成後に書き換えられることはない。
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredCandidate {
    profile: Profile,
    match_score: u8,
    match_reasons: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    connection_status: Option<ConnectionStatus>,
}

impl ScoredCandidate {
    pub fn new(profile: Profile, match_score: u8, match_reasons: Vec<String>) -> Self {
        Self {
            profile,
            match_score: match_score.min(MAX_SCORE as u8),
            match_reasons,
            connection_status: None,
        }
    }

    pub fn id(&self) -> &str {
        &self.profile.id
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// 0〜100 の整数スコア
    pub fn match_score(&self) -> u8 {
        self.match_score
    }

    /// 加点があった項目の説明（加点順）
    pub fn match_reasons(&self) -> &[String] {
        &self.match_reasons
    }

    /// 既存のつながり状態（注釈のみ。スコアには影響しない）
    pub fn connection_status(&self) -> Option<ConnectionStatus> {
        self.connection_status
    }

    /// つながり状態を付けた新しい値を返す
    pub fn with_connection_status(self, status: Option<ConnectionStatus>) -> Self {
        Self {
            connection_status: status,
            ..self
        }
    }

    pub fn into_profile(self) -> Profile {
        self.profile
    }
}

/// 1項目分の加点
struct Contribution {
    points: f64,
    reason: String,
}

/// 依頼者から見た候補者のマッチ度を計算する
///
/// 1. 基本スコアから開始
/// 2. 共通スキル × スキル配点
/// 3. 共通の興味 × 興味配点
/// 4. 依頼者の経営課題を候補者のスキルで補完できれば一度だけボーナス
/// 5. 業界・地域の一致（配点 0 なら無効）
///
/// 結果は四捨五入して 100 で頭打ち。乱数・I/O なしで、同じ入力には常に同じ結果を返す。
/// 設定は採点前に検証し、負の配点や NaN はクランプせずエラーにする。
pub fn score(
    requester: &Profile,
    candidate: &Profile,
    config: &RankingConfig,
) -> Result<ScoredCandidate, RankingConfigError> {
    config.validate()?;
    Ok(score_validated(requester, candidate, config))
}

/// 候補者一覧をまとめて採点する（入力順を保持）。設定の検証は一度だけ。
pub fn score_all(
    requester: &Profile,
    candidates: &[Profile],
    config: &RankingConfig,
) -> Result<Vec<ScoredCandidate>, RankingConfigError> {
    config.validate()?;
    Ok(candidates
        .iter()
        .map(|candidate| score_validated(requester, candidate, config))
        .collect())
}

// 呼び出し側で validate() 済みの設定を前提にする
pub(crate) fn score_validated(
    requester: &Profile,
    candidate: &Profile,
    config: &RankingConfig,
) -> ScoredCandidate {
    let contributions = [
        score_skills(requester, candidate, config),
        score_interests(requester, candidate, config),
        score_complement(requester, candidate, config),
        score_industry(requester, candidate, config),
        score_location(requester, candidate, config),
    ];

    let mut raw = config.base_score;
    let mut reasons = Vec::new();
    for contribution in contributions.into_iter().flatten() {
        if contribution.points <= 0.0 {
            continue;
        }
        raw += contribution.points;
        reasons.push(contribution.reason);
    }

    let match_score = raw.round().clamp(0.0, MAX_SCORE) as u8;
    ScoredCandidate::new(candidate.clone(), match_score, reasons)
}

fn score_skills(requester: &Profile, candidate: &Profile, config: &RankingConfig) -> Option<Contribution> {
    let common = candidate.skills.intersection_in_order(&requester.skills);
    if common.is_empty() {
        return None;
    }
    Some(Contribution {
        points: common.len() as f64 * config.weights.skill,
        reason: format!("共通スキル: {}", common.join("、")),
    })
}

fn score_interests(
    requester: &Profile,
    candidate: &Profile,
    config: &RankingConfig,
) -> Option<Contribution> {
    let common = candidate
        .interests
        .intersection_in_order(&requester.interests);
    if common.is_empty() {
        return None;
    }
    Some(Contribution {
        points: common.len() as f64 * config.weights.interest,
        reason: format!("共通の興味: {}", common.join("、")),
    })
}

fn score_complement(
    requester: &Profile,
    candidate: &Profile,
    config: &RankingConfig,
) -> Option<Contribution> {
    if requester.business_challenges.is_empty() {
        return None;
    }
    let matches = config
        .complements
        .complements(&requester.business_challenges, &candidate.skills);
    if matches.is_empty() {
        return None;
    }

    let details: Vec<String> = matches
        .iter()
        .map(|m| format!("{}（{}）", m.challenge, m.skills.join("、")))
        .collect();
    Some(Contribution {
        points: config.weights.complement_bonus,
        reason: format!("課題を補完できるスキル: {}", details.join(" / ")),
    })
}

fn score_industry(
    requester: &Profile,
    candidate: &Profile,
    config: &RankingConfig,
) -> Option<Contribution> {
    let industry = shared_value(requester.industry.as_deref(), candidate.industry.as_deref())?;
    Some(Contribution {
        points: config.weights.industry,
        reason: format!("同じ業界: {industry}"),
    })
}

fn score_location(
    requester: &Profile,
    candidate: &Profile,
    config: &RankingConfig,
) -> Option<Contribution> {
    let location = shared_value(requester.location.as_deref(), candidate.location.as_deref())?;
    Some(Contribution {
        points: config.weights.location,
        reason: format!("同じ地域: {location}"),
    })
}

fn shared_value<'a>(a: Option<&'a str>, b: Option<&'a str>) -> Option<&'a str> {
    match (a, b) {
        (Some(a), Some(b)) if a == b => Some(a),
        _ => None,
    }
}
