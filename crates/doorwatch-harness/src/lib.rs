//! Test harness for doorwatch.
//!
//! Provides the reference model used by model-based tests and helpers for
//! driving the real implementation under tokio's paused clock.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod model;

pub use model::{ModelDoor, Operation};

/// Let spawned checks run until the scheduler has nothing ready.
///
/// Scheduled checks register their sleep when their task is first polled, so
/// tests must settle after every operation: after an unlock so the check's
/// deadline is anchored at the current virtual instant, and after a time
/// advance so checks whose deadline was crossed fire before the next
/// operation mutates the door.
pub async fn settle() {
    for _ in 0..8 {
        tokio::task::yield_now().await;
    }
}

/// Advance tokio's paused virtual clock and settle.
pub async fn advance_and_settle(delta: std::time::Duration) {
    tokio::time::advance(delta).await;
    settle().await;
}
