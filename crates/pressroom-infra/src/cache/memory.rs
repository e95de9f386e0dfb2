//! In-process page cache bookkeeping.
//!
//! Records, per cache tag and per page path, when it was last revalidated and
//! how many times.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;

use pressroom_core::cache::PageCache;
use pressroom_types::error::CacheError;

/// What a revalidation record is keyed on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Tag(String),
    Path(String),
}

/// Revalidation history for one key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RevalidationRecord {
    pub last_revalidated_at: DateTime<Utc>,
    pub count: u64,
}

/// Thread-safe cache of revalidation records.
///
/// Paths are normalized (always start with `/`, no trailing slash except root).
#[derive(Debug, Clone, Default)]
pub struct InMemoryPageCache {
    records: Arc<DashMap<CacheKey, RevalidationRecord>>,
}

impl InMemoryPageCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Revalidation record for a key, if it was ever revalidated.
    pub fn record(&self, key: &CacheKey) -> Option<RevalidationRecord> {
        self.records.get(&normalize_key(key)).map(|r| *r.value())
    }

    /// How many times a tag was revalidated.
    pub fn tag_count(&self, tag: &str) -> u64 {
        self.record(&CacheKey::Tag(tag.to_string()))
            .map(|r| r.count)
            .unwrap_or(0)
    }

    /// How many times a path was revalidated.
    pub fn path_count(&self, path: &str) -> u64 {
        self.record(&CacheKey::Path(path.to_string()))
            .map(|r| r.count)
            .unwrap_or(0)
    }

    /// Total number of revalidations across all keys.
    pub fn total_revalidations(&self) -> u64 {
        self.records.iter().map(|r| r.value().count).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn touch(&self, key: CacheKey) {
        let now = Utc::now();
        self.records
            .entry(key)
            .and_modify(|r| {
                r.last_revalidated_at = now;
                r.count += 1;
            })
            .or_insert(RevalidationRecord {
                last_revalidated_at: now,
                count: 1,
            });
    }
}

impl PageCache for InMemoryPageCache {
    async fn revalidate_tag(&self, tag: &str) -> Result<(), CacheError> {
        let tag = tag.trim();
        if tag.is_empty() {
            return Err(CacheError::InvalidKey(tag.to_string()));
        }
        self.touch(CacheKey::Tag(tag.to_string()));
        tracing::debug!(tag = %tag, "tag revalidated");
        Ok(())
    }

    async fn revalidate_path(&self, path: &str) -> Result<(), CacheError> {
        if path.trim().is_empty() {
            return Err(CacheError::InvalidKey(path.to_string()));
        }
        let key = normalize_key(&CacheKey::Path(path.to_string()));
        tracing::debug!(key = ?key, "path revalidated");
        self.touch(key);
        Ok(())
    }
}

fn normalize_key(key: &CacheKey) -> CacheKey {
    match key {
        CacheKey::Tag(tag) => CacheKey::Tag(tag.trim().to_string()),
        CacheKey::Path(path) => CacheKey::Path(normalize_path(path)),
    }
}

/// Normalize a page path: ensure it starts with `/` and has no trailing slash.
fn normalize_path(path: &str) -> String {
    let mut normalized = path.trim().to_string();
    if !normalized.starts_with('/') {
        normalized = format!("/{normalized}");
    }
    // Remove trailing slash (unless root)
    if normalized.len() > 1 && normalized.ends_with('/') {
        normalized.pop();
    }
    normalized
}
