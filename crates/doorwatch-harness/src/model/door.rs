//! Model door - the reference implementation.
//!
//! Tracks virtual time explicitly and fires pending checks inline, which
//! makes its timeout behavior obviously correct: a check raises a fault iff
//! the door is open at the moment the check's deadline is crossed.

use std::time::Duration;

use super::operation::Operation;

/// Pure reference model of a timeout-supervised door.
#[derive(Debug, Clone)]
pub struct ModelDoor {
    timeout: Duration,
    open: bool,
    /// Virtual time elapsed since construction.
    now: Duration,
    /// Deadlines of checks that have not fired yet, in schedule order.
    pending: Vec<Duration>,
    faults: u64,
}

impl ModelDoor {
    /// Create a closed model door. `timeout` must be non-zero, mirroring the
    /// real constructor's validation.
    pub fn new(timeout: Duration) -> Self {
        assert!(!timeout.is_zero(), "model requires a positive timeout");
        Self { timeout, open: false, now: Duration::ZERO, pending: Vec::new(), faults: 0 }
    }

    /// Whether the door is currently open.
    pub fn is_opened(&self) -> bool {
        self.open
    }

    /// Total faults raised so far.
    pub fn faults(&self) -> u64 {
        self.faults
    }

    /// Checks scheduled but not yet fired.
    pub fn pending_checks(&self) -> usize {
        self.pending.len()
    }

    /// Apply one operation.
    pub fn apply(&mut self, op: &Operation) {
        match op {
            Operation::Lock => self.open = false,
            Operation::Unlock => {
                self.open = true;
                self.pending.push(self.now + self.timeout);
            },
            Operation::AdvanceTime { millis } => {
                self.advance(Duration::from_millis(u64::from(*millis)));
            },
        }
    }

    /// Advance virtual time, firing every check whose deadline is reached.
    ///
    /// The open flag cannot change mid-advance (operations are sequential),
    /// so the order fired checks are drained in does not matter.
    fn advance(&mut self, delta: Duration) {
        self.now += delta;

        let now = self.now;
        let open = self.open;
        let mut fired = 0u64;

        self.pending.retain(|deadline| {
            if *deadline <= now {
                if open {
                    fired += 1;
                }
                false
            } else {
                true
            }
        });

        self.faults += fired;
    }
}
