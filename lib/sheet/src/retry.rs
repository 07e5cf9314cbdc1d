//! Bounded retry for transient remote failures.

use std::future::Future;
use std::time::Duration;

use rand::Rng;

use crate::error::SheetError;

/// Maximum attempts per call, counting the first.
const MAX_ATTEMPTS: u32 = 3;

/// Run a remote call with exponential backoff on transient failures.
///
/// Backoff is `2^attempt` seconds plus 0–1 s of random jitter.
/// Non-transient errors and the final attempt's error propagate as-is.
pub async fn with_retry<T, F, Fut>(op: &str, mut call: F) -> Result<T, SheetError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, SheetError>>,
{
    let mut attempt = 0u32;
    loop {
        match call().await {
            Ok(value) => return Ok(value),
            Err(err) if attempt + 1 < MAX_ATTEMPTS && err.is_transient() => {
                let backoff = Duration::from_millis(1000 * (1 << attempt) + jitter_ms());
                tracing::warn!(op, attempt, error = %err, "transient sheet error, retrying in {:?}", backoff);
                tokio::time::sleep(backoff).await;
                attempt += 1;
            }
            Err(err) => return Err(err),
        }
    }
}

fn jitter_ms() -> u64 {
    rand::thread_rng().gen_range(0..1000)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn transient() -> SheetError {
        SheetError::Api { status: 503, message: "upstream".into() }
    }

    #[tokio::test(start_paused = true)]
    async fn recovers_after_transient_failures() {
        let calls = AtomicU32::new(0);
        let result = with_retry("test", || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { if n < 2 { Err(transient()) } else { Ok(n) } }
        })
        .await;
        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn gives_up_after_max_attempts() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(transient()) }
        })
        .await;
        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), MAX_ATTEMPTS);
    }

    #[tokio::test]
    async fn non_transient_fails_fast() {
        let calls = AtomicU32::new(0);
        let result: Result<(), _> = with_retry("test", || {
            calls.fetch_add(1, Ordering::SeqCst);
            async { Err(SheetError::Auth("bad token".into())) }
        })
        .await;
        assert!(matches!(result, Err(SheetError::Auth(_))));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
