//! One-shot timer scheduling.
//!
//! A [`Timer`] registers a [`TimerClient`] to be invoked once after a delay.
//! Registration is non-blocking: the callback runs on a spawned task that
//! sleeps through the [`Environment`], so callers never wait out the delay
//! themselves.
//!
//! ## Semantics
//!
//! - Exactly-once: a registration fires its client at most once, and always
//!   fires unless its [`TimerHandle`] is explicitly canceled first.
//! - Detach-on-drop: dropping a `TimerHandle` does NOT cancel the
//!   registration. Cancellation is always an explicit call.

use std::{
    sync::{
        Arc,
        atomic::{AtomicBool, Ordering},
    },
    time::Duration,
};

use crate::{env::Environment, error::DoorError};

/// Capability an object implements to receive a timer's fire event.
///
/// Invoked from the scheduled task's context, not the registering caller's,
/// so implementations must be safe to call from any task.
pub trait TimerClient: Send + Sync + 'static {
    /// Called once the registered delay has elapsed.
    fn on_timeout(&self);
}

/// Generic one-shot scheduler.
///
/// Stateless between registrations; each [`register`](Timer::register) call
/// spawns an independent task.
#[derive(Debug, Clone)]
pub struct Timer<E>
where
    E: Environment,
{
    env: E,
}

impl<E> Timer<E>
where
    E: Environment,
{
    /// Create a timer that sleeps through the given environment.
    pub fn new(env: E) -> Self {
        Self { env }
    }

    /// Schedule `client.on_timeout()` to run once after `delay`.
    ///
    /// Returns immediately. A zero delay fires on the next scheduler pass.
    /// The returned handle can cancel the registration before it fires;
    /// dropping the handle leaves the registration pending.
    ///
    /// Must be called from within a tokio runtime.
    pub fn register(&self, delay: Duration, client: Arc<dyn TimerClient>) -> TimerHandle {
        let canceled = Arc::new(AtomicBool::new(false));
        let env = self.env.clone();
        let fire_gate = Arc::clone(&canceled);

        let task = tokio::spawn(async move {
            env.sleep(delay).await;

            // The gate is checked once, at fire time. Cancellation that
            // arrives after this load has no effect.
            if !fire_gate.load(Ordering::SeqCst) {
                client.on_timeout();
            }
        });

        tracing::debug!(?delay, "timer registered");

        TimerHandle { canceled, task }
    }
}

/// Handle to one pending timer registration.
#[derive(Debug)]
pub struct TimerHandle {
    canceled: Arc<AtomicBool>,
    task: tokio::task::JoinHandle<()>,
}

impl TimerHandle {
    /// Cancel the registration if it has not fired yet.
    ///
    /// Canceling after the client has fired is a no-op.
    pub fn cancel(&self) {
        self.canceled.store(true, Ordering::SeqCst);
        self.task.abort();
        tracing::debug!("timer canceled");
    }

    /// Returns true if [`cancel`](Self::cancel) was called.
    pub fn is_canceled(&self) -> bool {
        self.canceled.load(Ordering::SeqCst)
    }

    /// Wait for the registration to resolve (fired or canceled).
    ///
    /// # Errors
    ///
    /// Returns `DoorError::Scheduling` if the scheduled task failed for any
    /// reason other than cancellation.
    pub async fn completed(self) -> Result<(), DoorError> {
        match self.task.await {
            Ok(()) => Ok(()),
            Err(e) if e.is_cancelled() => Ok(()),
            Err(e) => Err(DoorError::Scheduling { reason: e.to_string() }),
        }
    }
}
