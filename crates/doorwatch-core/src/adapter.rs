//! Bridge from the generic timer callback to door-specific logic.

use std::sync::Arc;

use crate::{
    door::{DoorState, TimedDoor},
    env::Environment,
    timer::TimerClient,
};

/// Adapts a [`TimedDoor`] to the [`TimerClient`] capability.
///
/// Bound to exactly one door for its lifetime. Holds the door's shared state
/// (not the door itself), so a pending check stays valid even if the door
/// value is dropped first.
#[derive(Debug)]
pub struct DoorTimerAdapter<E>
where
    E: Environment,
{
    env: E,
    door: Arc<DoorState>,
}

impl<E> DoorTimerAdapter<E>
where
    E: Environment,
{
    /// Bind an adapter to a door.
    pub fn new(door: &TimedDoor<E>) -> Self {
        Self { env: door.env().clone(), door: door.shared_state() }
    }
}

impl<E> TimerClient for DoorTimerAdapter<E>
where
    E: Environment,
{
    /// Check the door's state as of now: raise the fault if it is still
    /// open, do nothing if it was locked in the meantime.
    ///
    /// Re-checks current state on every call; no memoization.
    fn on_timeout(&self) {
        if self.door.is_opened() {
            self.door.raise_fault(self.env.now());
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{Door, SystemEnv};

    #[tokio::test]
    async fn open_door_raises_fault_on_timeout() {
        let (door, mut faults) =
            TimedDoor::new(SystemEnv::new(), Duration::from_secs(5)).unwrap();
        let adapter = DoorTimerAdapter::new(&door);

        door.unlock();
        adapter.on_timeout();

        let fault = faults.recv().await;
        assert!(fault.is_some());
        assert_eq!(fault.map(|f| f.timeout), Some(Duration::from_secs(5)));
    }

    #[tokio::test]
    async fn closed_door_is_a_noop_on_timeout() {
        let (door, mut faults) =
            TimedDoor::new(SystemEnv::new(), Duration::from_secs(5)).unwrap();
        let adapter = DoorTimerAdapter::new(&door);

        adapter.on_timeout();

        assert!(faults.try_recv().is_err());
        assert!(!door.is_opened());
    }

    #[tokio::test]
    async fn each_call_rechecks_current_state() {
        let (door, mut faults) =
            TimedDoor::new(SystemEnv::new(), Duration::from_secs(5)).unwrap();
        let adapter = DoorTimerAdapter::new(&door);

        door.unlock();
        adapter.on_timeout();
        door.lock();
        adapter.on_timeout();
        door.unlock();
        adapter.on_timeout();

        // Two of the three calls saw the door open.
        assert!(faults.try_recv().is_ok());
        assert!(faults.try_recv().is_ok());
        assert!(faults.try_recv().is_err());
    }
}
