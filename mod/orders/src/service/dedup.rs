//! Best-effort suppression of rapid double-submits.
//!
//! A bounded in-memory history of submission fingerprints. Not a
//! uniqueness constraint: non-durable, single-process, approximate
//! under concurrent requests.

use std::collections::VecDeque;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

pub struct RecentSubmissions {
    horizon: Duration,
    capacity: usize,
    entries: Mutex<VecDeque<(String, Instant)>>,
}

impl RecentSubmissions {
    pub fn new(horizon: Duration, capacity: usize) -> Self {
        Self { horizon, capacity, entries: Mutex::new(VecDeque::new()) }
    }

    /// Returns true if this fingerprint was already seen within the
    /// horizon; otherwise records it (evicting the oldest entry once
    /// the history is full) and returns false.
    pub async fn check_and_record(&self, fingerprint: &str) -> bool {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;
        entries.retain(|(_, stamped)| now.duration_since(*stamped) < self.horizon);
        if entries.iter().any(|(f, _)| f == fingerprint) {
            return true;
        }
        if entries.len() >= self.capacity {
            entries.pop_front();
        }
        entries.push_back((fingerprint.to_string(), now));
        false
    }
}
