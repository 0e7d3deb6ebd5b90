//! Application layer of the actions engine.
//!
//! # What lives here?
//!
//! - **`host`** – The `ActionsHost` trait: everything the engine needs from
//!   the outside world (element geometry, viewport checks, event synthesis).
//!
//! - **`state`** – `ActionState`, the per-session state plus the FIFO queue
//!   that serializes chain dispatches.  This is the public entry point:
//!   `perform_actions`, `release_actions`, `reset`.
//!
//! - **`parse`** – Parsing a payload against the session state and resolving
//!   element origins through the host.
//!
//! - **`tick`** – Chain and tick dispatch, including touch grouping.
//!
//! - **`dispatch`** – What each individual action does to the device state
//!   and which events it synthesizes.
//!
//! - **`touch`** – Composite multi-touch dispatch for grouped touch actions.
//!
//! - **`motion`** – Frame pacing for moves and scrolls with a duration.
//!
//! - **`origin`** – Dispatch-time resolution of viewport, pointer and element
//!   origins.

pub mod dispatch;
pub mod host;
pub mod motion;
pub mod origin;
pub mod parse;
pub mod state;
pub mod tick;
pub mod touch;
