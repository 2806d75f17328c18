//! Send-failure backoff.
//!
//! After a failed send the caller delays for a random duration drawn from a
//! window just below the current delay, and the window doubles (capped at
//! 30 s) for the next failure. Three consecutive failures exhaust the
//! policy: the fourth request reports give-up instead of another delay.

use std::time::Duration;

use rand::Rng;

use crate::core::constants::{
    FAIL_DELAYS_MAX, FAIL_DELAY_CAP_MS, FAIL_DELAY_JITTER_MS, FAIL_DELAY_SEED_MS,
};

/// Exponential send-failure backoff with randomized jitter.
#[derive(Debug, Clone)]
pub struct FailureBackoff {
    current_delay_ms: u32,
    consecutive_failures: u8,
}

impl Default for FailureBackoff {
    fn default() -> Self {
        Self::new()
    }
}

impl FailureBackoff {
    /// Create a backoff at the protocol seed delay with zero failures.
    pub fn new() -> Self {
        Self {
            current_delay_ms: FAIL_DELAY_SEED_MS,
            consecutive_failures: 0,
        }
    }

    /// Record a failure and compute the delay to wait before retrying.
    ///
    /// Returns `None` once [`FAIL_DELAYS_MAX`] consecutive failures have been
    /// recorded: the caller should give up rather than keep delaying.
    pub fn next_delay(&mut self) -> Option<Duration> {
        if self.consecutive_failures >= FAIL_DELAYS_MAX {
            return None;
        }

        let low = self.current_delay_ms.saturating_sub(FAIL_DELAY_JITTER_MS);
        let delay_ms = rand::thread_rng().gen_range(low..self.current_delay_ms);

        self.current_delay_ms = (self.current_delay_ms * 2).min(FAIL_DELAY_CAP_MS);
        self.consecutive_failures += 1;

        Some(Duration::from_millis(u64::from(delay_ms)))
    }

    /// Reset to the seed delay and zero failures after a successful send.
    pub fn reset(&mut self) {
        self.current_delay_ms = FAIL_DELAY_SEED_MS;
        self.consecutive_failures = 0;
    }

    /// Current delay window upper bound in milliseconds.
    pub fn current_delay_ms(&self) -> u32 {
        self.current_delay_ms
    }

    /// Consecutive failures recorded since the last reset.
    pub fn consecutive_failures(&self) -> u8 {
        self.consecutive_failures
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delays_drawn_from_jitter_window() {
        let mut backoff = FailureBackoff::new();

        // First failure: window is [10_000, 15_000).
        let d = backoff.next_delay().unwrap();
        assert!(d >= Duration::from_millis(10_000));
        assert!(d < Duration::from_millis(15_000));

        // Second failure: delay doubled and capped, window [25_000, 30_000).
        let d = backoff.next_delay().unwrap();
        assert!(d >= Duration::from_millis(25_000));
        assert!(d < Duration::from_millis(30_000));
    }

    #[test]
    fn test_delay_doubles_then_caps() {
        let mut backoff = FailureBackoff::new();
        assert_eq!(backoff.current_delay_ms(), 15_000);

        backoff.next_delay().unwrap();
        assert_eq!(backoff.current_delay_ms(), 30_000);

        backoff.next_delay().unwrap();
        assert_eq!(backoff.current_delay_ms(), 30_000);
    }

    #[test]
    fn test_gives_up_on_fourth_failure() {
        let mut backoff = FailureBackoff::new();
        for _ in 0..3 {
            assert!(backoff.next_delay().is_some());
        }
        assert_eq!(backoff.consecutive_failures(), 3);
        assert_eq!(backoff.next_delay(), None);
        // Still refused until a success resets it.
        assert_eq!(backoff.next_delay(), None);
    }

    #[test]
    fn test_reset_restores_seed() {
        let mut backoff = FailureBackoff::new();
        for _ in 0..3 {
            backoff.next_delay();
        }
        backoff.reset();
        assert_eq!(backoff.current_delay_ms(), 15_000);
        assert_eq!(backoff.consecutive_failures(), 0);

        let d = backoff.next_delay().unwrap();
        assert!(d >= Duration::from_millis(10_000));
        assert!(d < Duration::from_millis(15_000));
    }
}
