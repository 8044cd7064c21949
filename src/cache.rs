//! The cache module keeps scraped pages in memory for the lifetime of the process.

use std::collections::HashMap;

use chrono::{DateTime, TimeDelta, Utc};
use log::debug;

use crate::constants::CACHE_TTL_HOURS;
use crate::scrape::PageResult;

struct CacheEntry {
    data: PageResult,
    fetched_at: DateTime<Utc>,
}

/// Unbounded URL to page map whose entries expire after a fixed time-to-live.
///
/// Not synchronized: one query runs at a time, and the cache is passed by `&mut`.
pub struct PageCache {
    entries: HashMap<String, CacheEntry>,
    ttl: TimeDelta,
}

impl Default for PageCache {
    fn default() -> Self {
        Self::new()
    }
}

impl PageCache {
    /// Creates an empty cache with the standard 24 hour time-to-live.
    pub fn new() -> Self {
        Self::with_ttl(TimeDelta::hours(CACHE_TTL_HOURS))
    }

    pub fn with_ttl(ttl: TimeDelta) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
        }
    }

    pub fn ttl(&self) -> TimeDelta {
        self.ttl
    }

    /// Returns a copy of the fresh entry for `url`, evicting it if it has expired.
    pub fn get(&mut self, url: &str) -> Option<PageResult> {
        self.get_at(url, Utc::now())
    }

    /// Same as [`PageCache::get`] with an explicit clock reading.
    pub fn get_at(&mut self, url: &str, now: DateTime<Utc>) -> Option<PageResult> {
        let entry = self.entries.get(url)?;

        if now - entry.fetched_at > self.ttl {
            debug!("Cache entry for {url} expired, evicting");
            self.entries.remove(url);
            return None;
        }

        debug!("Cache hit for {url}");
        Some(entry.data.clone())
    }

    /// Stores `page` under `url`, replacing any previous entry.
    pub fn put(&mut self, url: &str, page: PageResult) {
        self.put_at(url, page, Utc::now());
    }

    /// Same as [`PageCache::put`] with an explicit fetch time.
    pub fn put_at(&mut self, url: &str, page: PageResult, fetched_at: DateTime<Utc>) {
        self.entries.insert(
            url.to_string(),
            CacheEntry {
                data: page,
                fetched_at,
            },
        );
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
