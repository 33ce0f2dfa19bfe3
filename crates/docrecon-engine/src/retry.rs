//! Reusable retry policy with jittered exponential backoff
//!
//! Both generative stages share this policy so their behavior stays
//! identical. Sleeping goes through the [`Sleep`] seam so tests can run
//! retries without wall-clock delay.

use rand::Rng;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tracing::warn;

/// Sleeping abstraction injected into retry loops
pub trait Sleep {
    /// Block the current thread for the given duration
    fn sleep(&self, duration: Duration);
}

/// Production sleeper: blocks the thread for real
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadSleeper;

impl Sleep for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Test sleeper: records requested durations instead of sleeping
#[derive(Debug, Default, Clone)]
pub struct RecordingSleeper {
    slept: Arc<Mutex<Vec<Duration>>>,
}

impl RecordingSleeper {
    /// Create a recording sleeper
    pub fn new() -> Self {
        Self::default()
    }

    /// Durations requested so far, in call order
    pub fn slept(&self) -> Vec<Duration> {
        self.slept.lock().unwrap().clone()
    }
}

impl Sleep for RecordingSleeper {
    fn sleep(&self, duration: Duration) {
        self.slept.lock().unwrap().push(duration);
    }
}

/// Retry parameters for a flaky operation
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Delay before the second attempt
    pub base_delay: Duration,
    /// Upper bound on any single delay (before jitter)
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    /// 5 attempts, 2 s base, 60 s cap: worst case roughly
    /// 2+4+8+16 = 30 s of sleep before the final attempt
    fn default() -> Self {
        Self {
            max_attempts: 5,
            base_delay: Duration::from_secs(2),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Delay after the given 1-based failed attempt:
    /// `min(base * 2^(attempt-1), cap)` jittered by a uniform factor
    /// in [-20%, +20%]
    pub fn delay_for(&self, attempt: u32) -> Duration {
        let exp = self.base_delay.as_secs_f64() * 2f64.powi(attempt.saturating_sub(1) as i32);
        let capped = exp.min(self.max_delay.as_secs_f64());
        let jitter: f64 = rand::thread_rng().gen_range(-0.2..=0.2);
        Duration::from_secs_f64(capped * (1.0 + jitter))
    }
}

/// Run `op` up to `policy.max_attempts` times, sleeping between failed
/// attempts. Returns the first success or the last attempt's error.
///
/// The closure receives the 1-based attempt number.
pub fn with_backoff<T, E, F>(policy: &RetryPolicy, sleeper: &dyn Sleep, mut op: F) -> Result<T, E>
where
    E: std::fmt::Display,
    F: FnMut(u32) -> Result<T, E>,
{
    let attempts = policy.max_attempts.max(1);
    for attempt in 1..attempts {
        match op(attempt) {
            Ok(value) => return Ok(value),
            Err(e) => {
                let delay = policy.delay_for(attempt);
                warn!(
                    attempt,
                    max_attempts = attempts,
                    delay_secs = delay.as_secs_f64(),
                    error = %e,
                    "attempt failed, retrying"
                );
                sleeper.sleep(delay);
            }
        }
    }
    op(attempts)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quick_policy() -> RetryPolicy {
        RetryPolicy::default()
    }

    #[test]
    fn test_succeeds_first_attempt_without_sleeping() {
        let sleeper = RecordingSleeper::new();
        let result: Result<u32, String> =
            with_backoff(&quick_policy(), &sleeper, |_| Ok(42));

        assert_eq!(result.unwrap(), 42);
        assert!(sleeper.slept().is_empty());
    }

    #[test]
    fn test_retries_until_success() {
        let sleeper = RecordingSleeper::new();
        let mut calls = 0;
        let result: Result<u32, String> = with_backoff(&quick_policy(), &sleeper, |_| {
            calls += 1;
            if calls < 3 {
                Err("transient".to_string())
            } else {
                Ok(7)
            }
        });

        assert_eq!(result.unwrap(), 7);
        assert_eq!(calls, 3);
        assert_eq!(sleeper.slept().len(), 2);
    }

    #[test]
    fn test_exhaustion_returns_last_error_after_exact_attempts() {
        let sleeper = RecordingSleeper::new();
        let mut calls = 0;
        let result: Result<(), String> = with_backoff(&quick_policy(), &sleeper, |attempt| {
            calls += 1;
            Err(format!("failure {}", attempt))
        });

        assert_eq!(calls, 5);
        assert_eq!(result.unwrap_err(), "failure 5");
        // No sleep after the final attempt
        assert_eq!(sleeper.slept().len(), 4);
    }

    #[test]
    fn test_backoff_schedule_within_jitter_bounds() {
        let sleeper = RecordingSleeper::new();
        let _: Result<(), String> =
            with_backoff(&quick_policy(), &sleeper, |_| Err("always".to_string()));

        let expected = [2.0, 4.0, 8.0, 16.0];
        let slept = sleeper.slept();
        assert_eq!(slept.len(), expected.len());
        for (actual, want) in slept.iter().zip(expected) {
            let secs = actual.as_secs_f64();
            assert!(
                secs >= want * 0.8 && secs <= want * 1.2,
                "delay {} outside [{}, {}]",
                secs,
                want * 0.8,
                want * 1.2
            );
        }
    }

    #[test]
    fn test_delay_is_capped() {
        let policy = RetryPolicy::default();
        // Attempt 10 would be 1024 s uncapped
        let delay = policy.delay_for(10).as_secs_f64();
        assert!(delay <= 60.0 * 1.2);
        assert!(delay >= 60.0 * 0.8);
    }

    #[test]
    fn test_zero_attempts_still_runs_once() {
        let policy = RetryPolicy {
            max_attempts: 0,
            ..RetryPolicy::default()
        };
        let sleeper = RecordingSleeper::new();
        let mut calls = 0;
        let _: Result<(), String> = with_backoff(&policy, &sleeper, |_| {
            calls += 1;
            Err("e".to_string())
        });
        assert_eq!(calls, 1);
    }
}
