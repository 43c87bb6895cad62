pub mod cached;
pub mod json_file;
pub mod memory;

use std::path::PathBuf;

use crate::Profile;

pub use cached::{CachedProfileStore, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL};
pub use json_file::{load_connection_statuses, JsonFileProfileStore};
pub use memory::InMemoryProfileStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {}: {source}", .path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("profile not found: {0}")]
    UnknownProfile(String),
}

/// 依頼者と候補者のプロフィールを供給する外部コラボレータ
///
/// 返すプロフィールは正規化済み（[`Profile`] は必ず `RawProfile` 経由で作られる）。
/// 候補者一覧に依頼者本人を含めない。
pub trait ProfileStore: Send + Sync {
    fn fetch_profile(&self, id: &str) -> Result<Option<Profile>, StoreError>;

    fn fetch_candidates(&self, requester_id: &str) -> Result<Vec<Profile>, StoreError>;

    /// 依頼者プロフィールと候補者一覧をまとめて取得する
    fn load_matching_input(&self, requester_id: &str) -> Result<(Profile, Vec<Profile>), StoreError> {
        let requester = self
            .fetch_profile(requester_id)?
            .ok_or_else(|| StoreError::UnknownProfile(requester_id.to_string()))?;
        let candidates = self.fetch_candidates(requester_id)?;
        Ok((requester, candidates))
    }
}
