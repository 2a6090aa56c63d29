//! Disk cache for decoded survey tables
//!
//! Census tables change on the Bureau's release schedule, not per request, so
//! responses are cached under the cache directory keyed by the request URL
//! (with the API key stripped). Entries older than the configured age are
//! ignored; offline mode accepts any age.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::error::Result;
use crate::models::Table;

/// A single cached response
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CacheEntry {
    fetched_at: DateTime<Utc>,
    url: String,
    table: Table,
}

/// File-backed response cache
#[derive(Debug, Clone)]
pub struct ResponseCache {
    dir: PathBuf,
    max_age: Duration,
}

impl ResponseCache {
    /// Create a cache rooted at `dir` with the given staleness horizon
    pub fn new(dir: PathBuf, max_age_hours: u64) -> Self {
        Self {
            dir,
            max_age: Duration::hours(max_age_hours as i64),
        }
    }

    /// Path of the entry for a cache URL
    fn entry_path(&self, url: &str) -> PathBuf {
        let digest = Sha256::digest(url.as_bytes());
        self.dir.join(format!("{}.json", hex::encode(digest)))
    }

    /// Load a cached table; stale entries are misses unless `ignore_age`
    pub fn load(&self, url: &str, ignore_age: bool) -> Option<Table> {
        let path = self.entry_path(url);
        let content = std::fs::read_to_string(&path).ok()?;

        let entry: CacheEntry = match serde_json::from_str(&content) {
            Ok(entry) => entry,
            Err(e) => {
                warn!("discarding unreadable cache entry {}: {}", path.display(), e);
                return None;
            }
        };

        if !ignore_age && Utc::now() - entry.fetched_at > self.max_age {
            debug!("cache entry for {} is stale", url);
            return None;
        }

        Some(entry.table)
    }

    /// Store a table under its cache URL
    pub fn store(&self, url: &str, table: &Table) -> Result<()> {
        std::fs::create_dir_all(&self.dir)?;

        let entry = CacheEntry {
            fetched_at: Utc::now(),
            url: url.to_string(),
            table: table.clone(),
        };

        let path = self.entry_path(url);
        std::fs::write(&path, serde_json::to_string(&entry)?)?;
        Ok(())
    }

    /// Remove all cached responses, returning how many were deleted
    pub fn clear(&self) -> Result<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let mut removed = 0;
        for entry in std::fs::read_dir(&self.dir)? {
            let path = entry?.path();
            if path.extension().map_or(false, |ext| ext == "json") {
                std::fs::remove_file(&path)?;
                removed += 1;
            }
        }
        Ok(removed)
    }

    /// Cache directory
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn table() -> Table {
        Table::from_value(json!([["NAME", "us"], ["United States", "1"]])).unwrap()
    }

    #[test]
    fn test_store_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().join("responses"), 24);

        let url = "https://api.census.gov/data/2019/acs/acs1?get=NAME&for=us:1";
        assert!(cache.load(url, false).is_none());

        cache.store(url, &table()).unwrap();
        assert_eq!(cache.load(url, false), Some(table()));
        assert!(cache.load("https://api.census.gov/other", false).is_none());
    }

    #[test]
    fn test_stale_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().join("responses"), 1);

        let url = "https://api.census.gov/data/2018/cbp?get=ESTAB";
        cache.store(url, &table()).unwrap();

        // Rewrite the entry with an old timestamp
        let path = cache.entry_path(url);
        let mut entry: CacheEntry =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        entry.fetched_at = Utc::now() - Duration::hours(2);
        std::fs::write(&path, serde_json::to_string(&entry).unwrap()).unwrap();

        assert!(cache.load(url, false).is_none());
        // Offline lookups accept stale entries
        assert_eq!(cache.load(url, true), Some(table()));
    }

    #[test]
    fn test_corrupt_entry_is_a_miss() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().to_path_buf(), 24);

        let url = "https://api.census.gov/data/x";
        std::fs::write(cache.entry_path(url), "not json").unwrap();
        assert!(cache.load(url, false).is_none());
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let cache = ResponseCache::new(dir.path().join("responses"), 24);

        cache.store("https://a", &table()).unwrap();
        cache.store("https://b", &table()).unwrap();
        assert_eq!(cache.clear().unwrap(), 2);
        assert!(cache.load("https://a", true).is_none());
        assert_eq!(cache.clear().unwrap(), 0);
    }
}
