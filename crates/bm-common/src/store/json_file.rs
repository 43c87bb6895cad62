use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use super::{ProfileStore, StoreError};
use crate::{connections::ConnectionStatus, Profile};

fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, StoreError> {
    let body = fs::read_to_string(path).map_err(|source| StoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&body).map_err(|source| StoreError::Decode {
        path: path.to_path_buf(),
        source,
    })
}

/// profiles テーブルのエクスポート（JSON 配列）を読むストア
///
/// 呼び出しのたびにファイルを読み直す。キャッシュが必要なら
/// [`CachedProfileStore`](super::CachedProfileStore) で包む。
#[derive(Debug, Clone)]
pub struct JsonFileProfileStore {
    path: PathBuf,
}

impl JsonFileProfileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    #[instrument(skip(self), fields(path = %self.path.display()))]
    fn load_all(&self) -> Result<Vec<Profile>, StoreError> {
        let profiles: Vec<Profile> = read_json(&self.path)?;
        debug!(count = profiles.len(), "profiles loaded");
        Ok(profiles)
    }
}

impl ProfileStore for JsonFileProfileStore {
    fn fetch_profile(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.load_all()?.into_iter().find(|p| p.id == id))
    }

    fn fetch_candidates(&self, requester_id: &str) -> Result<Vec<Profile>, StoreError> {
        let mut profiles = self.load_all()?;
        profiles.retain(|p| p.id != requester_id);
        Ok(profiles)
    }
}

/// 候補者 id → つながり状態 の JSON オブジェクトを読み込む
pub fn load_connection_statuses(
    path: &Path,
) -> Result<HashMap<String, ConnectionStatus>, StoreError> {
    let statuses: HashMap<String, ConnectionStatus> = read_json(path)?;
    debug!(path = %path.display(), count = statuses.len(), "connection statuses loaded");
    Ok(statuses)
}
