//! Per-session action state and the FIFO dispatch queue.
//!
//! # Why two locks? (for beginners)
//!
//! A session can receive a new perform-actions command while the previous
//! one is still sleeping between frames.  Commands must not interleave, so
//! every command first takes `queue`, an async mutex.  Tokio's mutex is fair:
//! waiters are woken in the order they arrived, which gives first-in
//! first-out dispatch.
//!
//! The device registry itself sits behind a plain `std::sync::Mutex`.  It is
//! only held for short synchronous sections (parse the request, press a key,
//! read a position) and never across an `.await`, so actions inside one tick
//! can run concurrently without blocking each other.

use std::sync::{Mutex, PoisonError};

use serde_json::Value;
use tokio::sync::Mutex as AsyncMutex;
use tracing::{debug, info};

use actions_core::{Action, ActionError, Chain, InputState, Tick};

use super::host::ActionsHost;
use super::parse::parse_actions;
use super::tick::{dispatch_chain, dispatch_tick};

/// State shared by every action request of one session.
#[derive(Debug, Default)]
pub struct ActionState {
    queue: AsyncMutex<()>,
    input: Mutex<InputState>,
}

impl ActionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Runs `f` with exclusive access to the device registry.
    ///
    /// A poisoned lock is recovered.
    pub fn with_input<R>(&self, f: impl FnOnce(&mut InputState) -> R) -> R {
        let mut guard = self.input.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut guard)
    }

    // ── Commands ──────────────────────────────────────────────────────────────

    /// Parses `actions` and dispatches the resulting chain.
    ///
    /// Requests are served one at a time in arrival order.  Parsing happens
    /// inside the queue so that pointer-type checks see devices registered by
    /// the request ahead of this one.
    ///
    /// # Errors
    ///
    /// The first parse or dispatch error.  Effects of ticks that already ran
    /// are not undone.
    pub async fn perform_actions(
        &self,
        host: &dyn ActionsHost,
        actions: &Value,
    ) -> Result<(), ActionError> {
        let _turn = self.queue.lock().await;

        let chain = parse_actions(self, host, actions).await?;
        debug!("Performing chain of {} ticks", chain.len());
        dispatch_chain(self, host, &chain).await
    }

    /// Dispatches an already parsed chain through the queue.
    pub async fn dispatch(&self, host: &dyn ActionsHost, chain: &Chain) -> Result<(), ActionError> {
        let _turn = self.queue.lock().await;
        dispatch_chain(self, host, chain).await
    }

    /// Undoes every press still held and forgets all devices.
    ///
    /// Pending releases run newest first in a single tick.  The device state
    /// is reset even when one of them fails.
    pub async fn release_actions(&self, host: &dyn ActionsHost) -> Result<(), ActionError> {
        let _turn = self.queue.lock().await;

        let mut undo = self.take_cancel_list();
        undo.reverse();

        let result = if undo.is_empty() {
            Ok(())
        } else {
            info!("Releasing {} held inputs", undo.len());
            dispatch_tick(self, host, &Tick(undo)).await
        };

        self.with_input(InputState::reset);
        result
    }

    /// Drains the pending release actions, oldest first.
    pub fn take_cancel_list(&self) -> Vec<Action> {
        self.with_input(InputState::take_cancel_list)
    }

    /// Forgets every device without dispatching anything.
    ///
    /// Waits for the request in flight, if any, to finish first.
    pub async fn reset(&self) {
        let _turn = self.queue.lock().await;
        self.with_input(InputState::reset);
    }
}
