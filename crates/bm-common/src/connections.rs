use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use strum::AsRefStr;

use crate::matching::ScoredCandidate;

/// connections テーブルの status 列
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, AsRefStr)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum ConnectionStatus {
    Pending,
    #[serde(alias = "connected")]
    Accepted,
    Rejected,
    Cancelled,
}

/// 候補者ごとの既存のつながり状態を返す外部コラボレータ
pub trait ConnectionStatusProvider {
    fn status_for(&self, candidate_id: &str) -> Option<ConnectionStatus>;
}

impl ConnectionStatusProvider for HashMap<String, ConnectionStatus> {
    fn status_for(&self, candidate_id: &str) -> Option<ConnectionStatus> {
        self.get(candidate_id).copied()
    }
}

/// つながり情報を持たない場合のプロバイダ
#[derive(Debug, Clone, Copy, Default)]
pub struct NoConnections;

impl ConnectionStatusProvider for NoConnections {
    fn status_for(&self, _candidate_id: &str) -> Option<ConnectionStatus> {
        None
    }
}

/// 各候補者につながり状態を付与した新しい一覧を返す。スコアと並び順は変えない。
pub fn annotate_connections(
    candidates: Vec<ScoredCandidate>,
    provider: &dyn ConnectionStatusProvider,
) -> Vec<ScoredCandidate> {
    candidates
        .into_iter()
        .map(|candidate| {
            let status = provider.status_for(candidate.id());
            candidate.with_connection_status(status)
        })
        .collect()
}
