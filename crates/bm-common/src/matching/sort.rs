use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, EnumString};

use super::scoring::ScoredCandidate;

/// 並び順
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, AsRefStr, EnumString,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum SortKey {
    /// マッチ度の高い順
    #[default]
    Score,
    /// 登録の新しい順
    Newest,
    /// 最終アクティブの新しい順
    Active,
    /// 表示名の昇順
    Name,
}

/// 安定ソートで並べ替えた新しい Vec を返す
///
/// 同じキーの候補者は入力順のまま。日時・名前が無い候補者は末尾に回る。
pub fn sort(candidates: &[ScoredCandidate], key: SortKey) -> Vec<ScoredCandidate> {
    let mut sorted = candidates.to_vec();
    match key {
        SortKey::Score => sorted.sort_by(|a, b| b.match_score().cmp(&a.match_score())),
        SortKey::Newest => {
            sorted.sort_by(|a, b| latest_first(a.profile().created_at, b.profile().created_at))
        }
        SortKey::Active => sorted.sort_by(|a, b| {
            latest_first(a.profile().last_active_at, b.profile().last_active_at)
        }),
        SortKey::Name => sorted.sort_by(|a, b| {
            present_first(a.profile().name.as_deref(), b.profile().name.as_deref())
        }),
    }
    sorted
}

// None < Some なので、降順にすると欠損は自然に末尾になる
fn latest_first(a: Option<DateTime<Utc>>, b: Option<DateTime<Utc>>) -> Ordering {
    b.cmp(&a)
}

fn present_first(a: Option<&str>, b: Option<&str>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
