//! Environment abstraction for deterministic testing.
//!
//! The `Environment` trait decouples supervision logic from system resources
//! (time, delays). This enables:
//!
//! - Deterministic Testing: tokio's paused clock drives scheduled checks
//!   without wall-clock sleeps, allowing perfect reproduction of timing races.
//!
//! - Production Runtime: `SystemEnv` uses real system time without any code
//!   changes to the supervision logic.
//!
//! # Invariants
//!
//! - Monotonicity: `env.now()` must never go backwards
//! - Isolation: Implementations must not share global state

use std::time::{Duration, Instant};

/// Abstract environment providing time and async delays.
///
/// Every component that schedules or timestamps work is generic over this
/// trait, so timeout behavior is testable against a virtual clock.
pub trait Environment: Clone + Send + Sync + 'static {
    /// Returns the current time.
    ///
    /// # Invariants
    ///
    /// - Monotonicity: This method MUST return values that never decrease
    ///   within a single execution context. Subsequent calls must return times
    ///   >= previous calls.
    fn now(&self) -> Instant;

    /// Sleeps for the specified duration.
    ///
    /// This is the ONLY async method in the trait. Scheduled checks use it to
    /// wait out their deadline; state-machine logic never awaits.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;
}

/// Production environment using system time.
///
/// This implementation:
/// - Uses `std::time::Instant::now()` for time
/// - Uses `tokio::time::sleep()` for async sleeping
///
/// Under tokio's paused test clock (`start_paused`), `sleep` follows the
/// virtual clock, which is what makes the timeout scenarios deterministic.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn system_env_time_advances() {
        let env = SystemEnv::new();

        let t1 = env.now();
        std::thread::sleep(Duration::from_millis(10));
        let t2 = env.now();

        assert!(t2 > t1, "Time should advance");
    }

    #[tokio::test(start_paused = true)]
    async fn system_env_sleep_follows_virtual_clock() {
        let env = SystemEnv::new();

        let start = tokio::time::Instant::now();
        env.sleep(Duration::from_secs(30)).await;
        let elapsed = start.elapsed();

        assert!(elapsed >= Duration::from_secs(30), "Sleep should wait the full delay");
    }
}
