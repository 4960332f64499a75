//! Fault and error types.

use std::time::{Duration, Instant};

use thiserror::Error;

/// Fault signaled when a door is found open past its timeout.
///
/// This is the single invariant violation in the system. It is not
/// recoverable by the door itself; it is delivered to the supervisor
/// observing the door's fault channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("door left open too long (timeout {timeout:?})")]
pub struct DoorFault {
    /// The timeout the door was configured with.
    pub timeout: Duration,
    /// When the check observed the door still open.
    pub observed_at: Instant,
}

/// Errors from door operations.
#[derive(Debug, Error)]
pub enum DoorError {
    /// Door was constructed with a timeout of zero.
    ///
    /// The timeout must be positive; a zero timeout would fault on every
    /// unlock before the caller could react.
    #[error("invalid timeout {0:?}: must be greater than zero")]
    InvalidTimeout(Duration),

    /// The door was left open past its timeout.
    #[error(transparent)]
    LeftOpenTooLong(#[from] DoorFault),

    /// The delay mechanism failed (scheduled check never completed).
    #[error("scheduling failed: {reason}")]
    Scheduling {
        /// Description of the scheduler failure.
        reason: String,
    },
}

impl DoorError {
    /// Returns true if this error is a timeout-invariant fault, as opposed
    /// to a configuration or scheduling problem.
    pub fn is_fault(&self) -> bool {
        matches!(self, Self::LeftOpenTooLong(_))
    }
}
