use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Mutex, PoisonError,
    },
    time::{Duration, Instant},
};

use tracing::debug;

use super::{ProfileStore, StoreError};
use crate::Profile;

/// 候補者一覧のキャッシュ有効期間（5分）
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(5 * 60);

/// 同時に保持する依頼者数の上限。超えたら最も古いエントリを捨てる
pub const DEFAULT_CACHE_MAX_ENTRIES: usize = 1024;

#[derive(Debug, Clone)]
struct CacheEntry {
    candidates: Vec<Profile>,
    fetched_at: Instant,
    // 同じ Instant になった場合の挿入順
    seq: u64,
}

/// 候補者一覧を依頼者 id ごとに TTL 付きでキャッシュするストア
///
/// ランカー自体は純粋で再計算も安いので、キャッシュはデータ取得側だけに置く。
/// 依頼者プロフィールの取得はキャッシュせず内側のストアへ素通しする。
pub struct CachedProfileStore<S> {
    inner: S,
    ttl: Duration,
    max_entries: usize,
    next_seq: AtomicU64,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl<S: ProfileStore> CachedProfileStore<S> {
    pub fn new(inner: S) -> Self {
        Self::with_ttl(inner, DEFAULT_CACHE_TTL)
    }

    pub fn with_ttl(inner: S, ttl: Duration) -> Self {
        Self::with_limits(inner, ttl, DEFAULT_CACHE_MAX_ENTRIES)
    }

    pub fn with_limits(inner: S, ttl: Duration, max_entries: usize) -> Self {
        Self {
            inner,
            ttl,
            max_entries,
            next_seq: AtomicU64::new(0),
            entries: Mutex::new(HashMap::new()),
        }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    /// キャッシュを全て破棄する
    pub fn invalidate(&self) {
        self.lock().clear();
    }

    /// 特定の依頼者のキャッシュだけを破棄する
    pub fn invalidate_requester(&self, requester_id: &str) {
        self.lock().remove(requester_id);
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, CacheEntry>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn is_fresh(&self, entry: &CacheEntry) -> bool {
        entry.fetched_at.elapsed() < self.ttl
    }

    fn store(&self, requester_id: &str, candidates: &[Profile]) {
        if self.max_entries == 0 {
            return;
        }
        let mut entries = self.lock();
        entries.retain(|_, entry| self.is_fresh(entry));
        if entries.len() >= self.max_entries && !entries.contains_key(requester_id) {
            if let Some(victim) = entries
                .iter()
                .min_by_key(|(_, entry)| (entry.fetched_at, entry.seq))
                .map(|(key, _)| key.clone())
            {
                debug!(evicted = %victim, "candidate cache full");
                entries.remove(&victim);
            }
        }
        entries.insert(
            requester_id.to_string(),
            CacheEntry {
                candidates: candidates.to_vec(),
                fetched_at: Instant::now(),
                seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
            },
        );
    }
}

impl<S: ProfileStore> ProfileStore for CachedProfileStore<S> {
    fn fetch_profile(&self, id: &str) -> Result<Option<Profile>, StoreError> {
        self.inner.fetch_profile(id)
    }

    fn fetch_candidates(&self, requester_id: &str) -> Result<Vec<Profile>, StoreError> {
        {
            let mut entries = self.lock();
            entries.retain(|_, entry| self.is_fresh(entry));
            if let Some(entry) = entries.get(requester_id) {
                debug!(requester_id, count = entry.candidates.len(), "candidate cache hit");
                return Ok(entry.candidates.clone());
            }
        }

        debug!(requester_id, "candidate cache miss");
        let candidates = self.inner.fetch_candidates(requester_id)?;
        self.store(requester_id, &candidates);
        Ok(candidates)
    }
}
