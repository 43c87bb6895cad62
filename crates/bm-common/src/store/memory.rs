use super::{ProfileStore, StoreError};
use crate::Profile;

/// メモリ上のプロフィール一覧
#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileStore {
    profiles: Vec<Profile>,
}

impl InMemoryProfileStore {
    pub fn new(profiles: Vec<Profile>) -> Self {
        Self { profiles }
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }
}

impl ProfileStore for InMemoryProfileStore {
    fn fetch_profile(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        Ok(self.profiles.iter().find(|p| p.id == id).cloned())
    }

    fn fetch_candidates(&self, requester_id: &str) -> Result<Vec<Profile>, StoreError> {
        Ok(self
            .profiles
            .iter()
            .filter(|p| p.id != requester_id)
            .cloned()
            .collect())
    }
}
