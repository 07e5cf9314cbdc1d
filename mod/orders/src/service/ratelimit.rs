//! Fixed-window request limiter.
//!
//! Guards the reconciliation-backed read endpoints, which each cost a
//! full-worksheet scan upstream. In-process and approximate; counters
//! reset when the window rolls over.

use std::collections::HashMap;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;

struct Window {
    started: Instant,
    count: u32,
}

pub struct FixedWindowLimiter {
    window: Duration,
    max_requests: u32,
    windows: Mutex<HashMap<String, Window>>,
}

impl FixedWindowLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self { window, max_requests, windows: Mutex::new(HashMap::new()) }
    }

    /// Count a request against `key`'s current window; false when the
    /// window's budget is already spent.
    pub async fn allow(&self, key: &str) -> bool {
        let now = Instant::now();
        let mut windows = self.windows.lock().await;
        let w = windows
            .entry(key.to_string())
            .or_insert(Window { started: now, count: 0 });
        if now.duration_since(w.started) >= self.window {
            w.started = now;
            w.count = 0;
        }
        w.count += 1;
        w.count <= self.max_requests
    }
}

impl Default for FixedWindowLimiter {
    /// 30 requests per 60-second window.
    fn default() -> Self {
        Self::new(30, Duration::from_secs(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn budget_is_per_window_and_per_key() {
        let limiter = FixedWindowLimiter::new(30, Duration::from_secs(60));
        for _ in 0..30 {
            assert!(limiter.allow("pivot_data").await);
        }
        assert!(!limiter.allow("pivot_data").await);
        assert!(limiter.allow("orders_by_product").await);
    }

    #[tokio::test(start_paused = true)]
    async fn a_new_window_admits_again() {
        let limiter = FixedWindowLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.allow("k").await);
        assert!(limiter.allow("k").await);
        assert!(!limiter.allow("k").await);
        tokio::time::advance(Duration::from_secs(61)).await;
        assert!(limiter.allow("k").await);
    }
}
