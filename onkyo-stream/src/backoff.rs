//! Exponential reconnection backoff.

use std::time::Duration;

use rand::Rng;

use crate::config::BackoffConfig;

/// Delay schedule for consecutive reconnect attempts
///
/// The n-th delay is `initial * multiplier^n` plus a random jitter below `initial`,
/// capped at `max_delay`. With a multiplier of at least 2 the delays strictly increase
/// until the cap is reached.
#[derive(Debug, Clone)]
pub struct Backoff {
    config: BackoffConfig,
    attempt: u32,
}

impl Backoff {
    pub fn new(config: BackoffConfig) -> Self {
        Self { config, attempt: 0 }
    }

    /// Attempts handed out since the last reset
    pub fn attempt(&self) -> u32 {
        self.attempt
    }

    /// Delay before the next attempt
    pub fn next_delay(&mut self) -> Duration {
        let base = self.base_delay(self.attempt);
        self.attempt = self.attempt.saturating_add(1);

        let jitter = if self.config.jitter {
            let bound = self.config.initial_delay.as_millis().min(u64::MAX as u128) as u64;
            Duration::from_millis(rand::rng().random_range(0..bound.max(1)))
        } else {
            Duration::ZERO
        };

        base.saturating_add(jitter).min(self.config.max_delay)
    }

    pub fn reset(&mut self) {
        self.attempt = 0;
    }

    fn base_delay(&self, attempt: u32) -> Duration {
        let factor = self.config.multiplier.powi(attempt.min(i32::MAX as u32) as i32);
        let max = self.config.max_delay.as_secs_f64();
        let secs = (self.config.initial_delay.as_secs_f64() * factor).min(max);
        Duration::try_from_secs_f64(secs).unwrap_or(self.config.max_delay)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_schedule_doubles_until_cap() {
        let mut backoff = Backoff::new(BackoffConfig::fixed_schedule());
        let delays: Vec<u64> = (0..9).map(|_| backoff.next_delay().as_secs()).collect();
        assert_eq!(delays, vec![1, 2, 4, 8, 16, 32, 60, 60, 60]);
        assert_eq!(backoff.attempt(), 9);
    }

    #[test]
    fn test_jittered_delays_strictly_increase_until_cap() {
        for _ in 0..50 {
            let mut backoff = Backoff::new(BackoffConfig::default());
            let delays: Vec<Duration> = (0..6).map(|_| backoff.next_delay()).collect();
            for pair in delays.windows(2) {
                assert!(pair[1] > pair[0], "{:?}", delays);
            }
            assert!(delays[0] >= Duration::from_secs(1));
            assert!(delays[0] < Duration::from_secs(2));
        }
    }

    #[test]
    fn test_jitter_never_exceeds_cap() {
        let mut backoff = Backoff::new(BackoffConfig::default());
        for _ in 0..20 {
            assert!(backoff.next_delay() <= Duration::from_secs(60));
        }
    }

    #[test]
    fn test_reset() {
        let mut backoff = Backoff::new(BackoffConfig::fixed_schedule());
        backoff.next_delay();
        backoff.next_delay();
        backoff.reset();
        assert_eq!(backoff.next_delay(), Duration::from_secs(1));
    }

    #[test]
    fn test_many_attempts_do_not_overflow() {
        let mut backoff = Backoff::new(BackoffConfig::fixed_schedule());
        for _ in 0..10_000 {
            backoff.next_delay();
        }
        assert_eq!(backoff.next_delay(), Duration::from_secs(60));
    }
}
