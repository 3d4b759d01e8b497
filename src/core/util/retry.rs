use std::future::Future;
use std::time::Duration;

use tracing::{debug, warn};

use crate::errors::ConflictError;

/// Retry schedule for optimistic-concurrency updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Backoff {
    /// Total number of attempts, including the first one.
    pub steps: u32,
    /// Delay before the second attempt.
    pub duration: Duration,
    /// Multiplier applied to the delay after each retry.
    pub factor: f64,
}

impl Backoff {
    /// Five attempts, 10ms apart.
    pub fn default_retry() -> Self {
        Self {
            steps: 5,
            duration: Duration::from_millis(10),
            factor: 1.0,
        }
    }
}

impl Default for Backoff {
    fn default() -> Self {
        Self::default_retry()
    }
}

/// Run `f` until it succeeds, returns a non-conflict error, or the backoff
/// runs out of steps. In the last case the final conflict error is returned.
///
/// `f` should fetch the latest version of the object, apply its changes and
/// write it back, so every attempt works on a fresh resourceVersion.
pub async fn retry_on_conflict<T, E, F, Fut>(backoff: Backoff, mut f: F) -> Result<T, E>
where
    E: ConflictError + std::fmt::Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let steps = backoff.steps.max(1);
    let mut delay = backoff.duration;
    let mut attempt = 1;

    loop {
        match f().await {
            Ok(value) => {
                debug!("Update succeeded on attempt {}", attempt);
                return Ok(value);
            }
            Err(e) if e.is_conflict() && attempt < steps => {
                warn!(
                    "Conflict on attempt {}/{}: {}, retrying in {:?}",
                    attempt, steps, e, delay
                );
                tokio::time::sleep(delay).await;
                delay = delay.mul_f64(backoff.factor);
                attempt += 1;
            }
            Err(e) => return Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[derive(Debug)]
    enum TestError {
        Conflict,
        Fatal,
    }

    impl std::fmt::Display for TestError {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            write!(f, "{:?}", self)
        }
    }

    impl ConflictError for TestError {
        fn is_conflict(&self) -> bool {
            matches!(self, TestError::Conflict)
        }
    }

    fn fast(steps: u32) -> Backoff {
        Backoff {
            steps,
            duration: Duration::from_millis(1),
            factor: 1.0,
        }
    }

    #[tokio::test]
    async fn succeeds_after_conflicts() {
        let calls = AtomicU32::new(0);
        let result = retry_on_conflict(fast(5), || async {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                Err(TestError::Conflict)
            } else {
                Ok(n)
            }
        })
        .await;

        assert_eq!(result.unwrap(), 2);
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn returns_last_conflict_when_steps_exhausted() {
        let calls = AtomicU32::new(0);
        let result: Result<(), TestError> = retry_on_conflict(fast(3), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(TestError::Conflict)
        })
        .await;

        assert!(matches!(result, Err(TestError::Conflict)));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn other_errors_are_not_retried() {
        let calls = AtomicU32::new(0);
        let result: Result<(), TestError> = retry_on_conflict(fast(5), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(TestError::Fatal)
        })
        .await;

        assert!(matches!(result, Err(TestError::Fatal)));
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn zero_steps_still_attempts_once() {
        let calls = AtomicU32::new(0);
        let result: Result<(), TestError> = retry_on_conflict(fast(0), || async {
            calls.fetch_add(1, Ordering::SeqCst);
            Err(TestError::Conflict)
        })
        .await;

        assert!(result.is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn delay_grows_by_factor() {
        let start = std::time::Instant::now();
        let stamps = std::sync::Mutex::new(Vec::new());
        let backoff = Backoff {
            steps: 3,
            duration: Duration::from_millis(5),
            factor: 4.0,
        };

        let result: Result<(), TestError> = retry_on_conflict(backoff, || async {
            stamps.lock().unwrap().push(start.elapsed());
            Err(TestError::Conflict)
        })
        .await;
        assert!(result.is_err());

        let stamps = stamps.into_inner().unwrap();
        assert_eq!(stamps.len(), 3);
        // Sleeps never end early, so each gap is at least the scheduled delay.
        assert!(stamps[1] - stamps[0] >= Duration::from_millis(5));
        assert!(stamps[2] - stamps[1] >= Duration::from_millis(20));
    }

    #[test]
    fn default_retry_matches_schedule() {
        let b = Backoff::default();
        assert_eq!(b.steps, 5);
        assert_eq!(b.duration, Duration::from_millis(10));
        assert_eq!(b.factor, 1.0);
    }
}
