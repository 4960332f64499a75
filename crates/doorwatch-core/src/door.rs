//! Door state machine and timeout supervision.
//!
//! Two door variants live here:
//!
//! - [`SimpleDoor`]: a plain stateful door, just the open flag.
//! - [`TimedDoor`]: a door that schedules an independent one-shot check on
//!   every unlock and reports a [`DoorFault`] for any check that finds it
//!   still open at its deadline.
//!
//! ## State machine
//!
//! States `{Closed, Open}`, initial `Closed`.
//!
//! ```text
//! Closed --unlock--> Open     (schedules a check)
//! Open   --unlock--> Open     (schedules another, independent check)
//! Open   --lock---> Closed
//! Closed --lock---> Closed    (no-op)
//! ```
//!
//! The timer only observes the open flag; it never closes the door.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::{Duration, Instant},
};

use tokio::sync::mpsc;

use crate::{
    adapter::DoorTimerAdapter,
    env::Environment,
    error::{DoorError, DoorFault},
    timer::Timer,
};

/// Door capability: lockable, unlockable, queryable.
///
/// Object-safe so doors can be mocked and decorated in tests. Methods take
/// `&self` because a door's state may be shared across execution contexts.
pub trait Door: Send + Sync {
    /// Close the door. Subsequent [`is_opened`](Door::is_opened) returns
    /// false until the next unlock.
    fn lock(&self);

    /// Open the door.
    fn unlock(&self);

    /// Whether the door is currently open. Pure query, no side effects.
    fn is_opened(&self) -> bool;
}

/// Plain stateful door with no timeout supervision.
#[derive(Debug, Default)]
pub struct SimpleDoor {
    open: AtomicBool,
}

impl SimpleDoor {
    /// Create a closed door.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl Door for SimpleDoor {
    fn lock(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    fn unlock(&self) {
        self.open.store(true, Ordering::SeqCst);
    }

    fn is_opened(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }
}

/// Shared door state observed by pending checks.
///
/// Held behind an `Arc` by the door and by every scheduled check, so a check
/// can never observe a destroyed door: the state lives until the last pending
/// check resolves.
#[derive(Debug)]
pub(crate) struct DoorState {
    /// The only shared mutable state. SeqCst so a check's read at fire time
    /// is linearizable with concurrent lock/unlock calls.
    open: AtomicBool,
    /// Configured timeout, immutable after construction.
    timeout: Duration,
    /// Fault channel to the supervisor.
    faults: mpsc::UnboundedSender<DoorFault>,
}

impl DoorState {
    pub(crate) fn is_opened(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// Raise the "left open too long" fault unconditionally.
    ///
    /// Emits the fault on the channel and logs it in the raising context.
    /// A closed channel means no supervisor is listening; the fault is still
    /// logged.
    pub(crate) fn raise_fault(&self, observed_at: Instant) -> DoorFault {
        let fault = DoorFault { timeout: self.timeout, observed_at };
        tracing::warn!(timeout = ?self.timeout, "door left open too long");

        if self.faults.send(fault).is_err() {
            tracing::debug!("fault receiver dropped, fault not delivered");
        }

        fault
    }
}

/// A door supervised by a timeout.
///
/// Every `unlock()` schedules a fresh one-shot check `timeout` in the
/// future. Checks are independent: unlocking again while one is pending adds
/// another, and locking does not cancel any. A check that fires on a closed
/// door is a no-op, so only checks whose unlock was never followed by a lock
/// produce a fault.
#[derive(Debug)]
pub struct TimedDoor<E>
where
    E: Environment,
{
    env: E,
    state: Arc<DoorState>,
}

impl<E> TimedDoor<E>
where
    E: Environment,
{
    /// Create a closed door with the given timeout.
    ///
    /// Returns the door and the receiving end of its fault channel. Faults
    /// from all scheduled checks (and from
    /// [`raise_open_too_long_fault`](Self::raise_open_too_long_fault)) arrive
    /// on the receiver in observation order.
    ///
    /// # Errors
    ///
    /// Returns `DoorError::InvalidTimeout` if `timeout` is zero.
    pub fn new(
        env: E,
        timeout: Duration,
    ) -> Result<(Self, mpsc::UnboundedReceiver<DoorFault>), DoorError> {
        if timeout.is_zero() {
            return Err(DoorError::InvalidTimeout(timeout));
        }

        let (faults, fault_rx) = mpsc::unbounded_channel();
        let state = Arc::new(DoorState { open: AtomicBool::new(false), timeout, faults });

        Ok((Self { env, state }, fault_rx))
    }

    /// The timeout this door was configured with.
    pub fn timeout(&self) -> Duration {
        self.state.timeout
    }

    /// Raise the "left open too long" fault regardless of current state.
    ///
    /// Distinct from the scheduled check so a supervisory caller can invoke
    /// it directly. The fault is emitted on the fault channel and returned,
    /// letting the caller propagate it as an error as well.
    pub fn raise_open_too_long_fault(&self) -> DoorFault {
        self.state.raise_fault(self.env.now())
    }

    /// Schedule one deferred check at `now + timeout`.
    fn schedule_check(&self) {
        let adapter = Arc::new(DoorTimerAdapter::new(self));
        let timer = Timer::new(self.env.clone());

        // Detached on purpose: the check fires whether or not anyone holds
        // a handle to it.
        drop(timer.register(self.state.timeout, adapter));
    }

    pub(crate) fn shared_state(&self) -> Arc<DoorState> {
        Arc::clone(&self.state)
    }

    pub(crate) fn env(&self) -> &E {
        &self.env
    }
}

impl<E> Door for TimedDoor<E>
where
    E: Environment,
{
    fn lock(&self) {
        self.state.open.store(false, Ordering::SeqCst);
        tracing::debug!("door locked");
    }

    fn unlock(&self) {
        self.state.open.store(true, Ordering::SeqCst);
        tracing::debug!(timeout = ?self.state.timeout, "door unlocked, check scheduled");
        self.schedule_check();
    }

    fn is_opened(&self) -> bool {
        self.state.is_opened()
    }
}
