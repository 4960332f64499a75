//! Timeout-supervised door model.
//!
//! A [`TimedDoor`] is a lockable door that must not stay open past its
//! configured timeout. Every `unlock()` schedules an independent one-shot
//! check; a check that finds the door still open at its deadline raises a
//! [`DoorFault`] on the door's fault channel.
//!
//! ## Architecture
//!
//! ```text
//! doorwatch-core
//!   ├─ Door / SimpleDoor    (capability trait + plain stateful door)
//!   ├─ TimedDoor<E>         (state machine + per-unlock check scheduling)
//!   ├─ Timer<E>             (generic one-shot scheduler)
//!   ├─ DoorTimerAdapter<E>  (TimerClient that inspects the door and faults)
//!   └─ Environment          (time/sleep abstraction; SystemEnv in production)
//! ```
//!
//! Scheduling is non-blocking: `unlock()` returns immediately and the check
//! runs on a spawned task at or after `now + timeout`. Faults are typed
//! values delivered to the supervisor holding the fault receiver, never
//! panics or swallowed conditions. A check that fires on a door locked in
//! the meantime is a no-op.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod adapter;
mod door;
mod env;
mod error;
mod timer;

pub use adapter::DoorTimerAdapter;
pub use door::{Door, SimpleDoor, TimedDoor};
pub use env::{Environment, SystemEnv};
pub use error::{DoorError, DoorFault};
pub use timer::{Timer, TimerClient, TimerHandle};
