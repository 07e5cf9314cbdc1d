//! Fixed-TTL memoization of full-worksheet reads.
//!
//! Keys are fixed strings (one per worksheet scan). Any write
//! invalidates everything, never selectively.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

type Grid = Arc<Vec<Vec<String>>>;

pub struct ReadCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, (Instant, Grid)>>,
}

impl ReadCache {
    pub fn new(ttl: Duration) -> Self {
        Self { ttl, entries: Mutex::new(HashMap::new()) }
    }

    pub async fn get(&self, key: &str) -> Option<Grid> {
        let entries = self.entries.lock().await;
        let (stamped, grid) = entries.get(key)?;
        if stamped.elapsed() < self.ttl {
            Some(Arc::clone(grid))
        } else {
            None
        }
    }

    pub async fn put(&self, key: &str, rows: Vec<Vec<String>>) -> Grid {
        let grid = Arc::new(rows);
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), (Instant::now(), Arc::clone(&grid)));
        grid
    }

    pub async fn clear(&self) {
        self.entries.lock().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        vec![vec!["a".to_string()]]
    }

    #[tokio::test]
    async fn hit_within_ttl() {
        let cache = ReadCache::new(Duration::from_secs(15));
        cache.put("orders_rows", rows()).await;
        assert!(cache.get("orders_rows").await.is_some());
        assert!(cache.get("other").await.is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn entries_expire_after_ttl() {
        let cache = ReadCache::new(Duration::from_secs(15));
        cache.put("orders_rows", rows()).await;
        tokio::time::advance(Duration::from_secs(16)).await;
        assert!(cache.get("orders_rows").await.is_none());
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache = ReadCache::new(Duration::from_secs(15));
        cache.put("orders_rows", rows()).await;
        cache.put("requirements_rows", rows()).await;
        cache.clear().await;
        assert!(cache.get("orders_rows").await.is_none());
        assert!(cache.get("requirements_rows").await.is_none());
    }
}
