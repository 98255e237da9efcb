//! Poll-until-predicate utility.

use std::future::Future;
use std::time::{Duration, Instant};

/// Result of a [`poll_until`] run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PollOutcome<T> {
    /// The predicate produced a value before the deadline.
    Completed(T),
    /// The deadline passed without the predicate producing a value.
    TimedOut,
}

impl<T> PollOutcome<T> {
    pub fn is_completed(&self) -> bool {
        matches!(self, PollOutcome::Completed(_))
    }

    pub fn into_option(self) -> Option<T> {
        match self {
            PollOutcome::Completed(v) => Some(v),
            PollOutcome::TimedOut => None,
        }
    }
}

/// Run `predicate` every `interval` until it returns `Some` or `deadline`
/// elapses. The predicate is always tried at least once. Dropping the
/// returned future cancels the wait; there is nothing to deregister.
pub async fn poll_until<T, F, Fut>(
    interval: Duration,
    deadline: Duration,
    mut predicate: F,
) -> PollOutcome<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Option<T>>,
{
    let start = Instant::now();

    loop {
        if let Some(value) = predicate().await {
            return PollOutcome::Completed(value);
        }

        if start.elapsed() >= deadline {
            return PollOutcome::TimedOut;
        }

        tokio::time::sleep(interval).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_completes_immediately() {
        let outcome = poll_until(Duration::from_millis(10), Duration::from_millis(100), || async {
            Some(42)
        })
        .await;
        assert_eq!(outcome, PollOutcome::Completed(42));
    }

    #[tokio::test]
    async fn test_completes_after_attempts() {
        let calls = AtomicU32::new(0);
        let outcome = poll_until(Duration::from_millis(1), Duration::from_secs(5), || {
            let n = calls.fetch_add(1, Ordering::SeqCst);
            async move { if n >= 3 { Some("ready") } else { None } }
        })
        .await;
        assert_eq!(outcome, PollOutcome::Completed("ready"));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[tokio::test]
    async fn test_times_out() {
        let outcome: PollOutcome<()> =
            poll_until(Duration::from_millis(1), Duration::from_millis(10), || async { None })
                .await;
        assert_eq!(outcome, PollOutcome::TimedOut);
    }

    #[tokio::test]
    async fn test_tried_at_least_once_with_zero_deadline() {
        let outcome = poll_until(Duration::from_millis(1), Duration::ZERO, || async { Some(1) }).await;
        assert!(outcome.is_completed());
    }

    #[test]
    fn test_into_option() {
        assert_eq!(PollOutcome::Completed(7).into_option(), Some(7));
        assert_eq!(PollOutcome::<u8>::TimedOut.into_option(), None);
    }
}
