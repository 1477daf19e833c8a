//! Quiet-period debounce for free-text input.
//!
//! The clock is passed in by the caller, so the debouncer never sleeps or
//! spawns anything and is deterministic under test.

use std::time::{Duration, Instant};

/// Default quiet period before a query is applied.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(300);

/// Holds the latest pushed value until input has been quiet for `delay`.
#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    /// Latest value and when it arrived.
    pending: Option<(T, Instant)>,
}

impl<T> Default for Debouncer<T> {
    fn default() -> Self {
        Self::new(DEFAULT_DEBOUNCE)
    }
}

impl<T> Debouncer<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Record a new value; restarts the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Release the pending value once `delay` has passed since the last push.
    pub fn poll(&mut self, now: Instant) -> Option<T> {
        let ready = self
            .pending
            .as_ref()
            .is_some_and(|(_, at)| now.saturating_duration_since(*at) >= self.delay);
        if ready {
            self.pending.take().map(|(value, _)| value)
        } else {
            None
        }
    }

    /// Release the pending value immediately.
    pub fn flush(&mut self) -> Option<T> {
        self.pending.take().map(|(value, _)| value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_releases_after_quiet_period() {
        let start = Instant::now();
        let mut debouncer = Debouncer::default();
        debouncer.push("ri", start);
        debouncer.push("rice", start + Duration::from_millis(200));
        assert_eq!(debouncer.poll(start + Duration::from_millis(400)), None);
        assert_eq!(
            debouncer.poll(start + Duration::from_millis(500)),
            Some("rice")
        );
        assert!(!debouncer.is_pending());
        assert_eq!(debouncer.poll(start + Duration::from_secs(5)), None);
    }

    #[test]
    fn test_flush_skips_wait() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::from_secs(10));
        debouncer.push(String::from("wheat"), start);
        assert_eq!(debouncer.flush().as_deref(), Some("wheat"));
        assert_eq!(debouncer.flush(), None);
    }

    #[test]
    fn test_zero_delay_is_immediate() {
        let start = Instant::now();
        let mut debouncer = Debouncer::new(Duration::ZERO);
        debouncer.push(1, start);
        assert_eq!(debouncer.poll(start), Some(1));
    }
}
