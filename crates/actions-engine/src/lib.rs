//! actions-engine library entry point.
//!
//! Re-exports all public modules so that integration tests in `tests/`
//! and the `actions-replay` binary share the same module tree.
//!
//! # What does the engine do? (for beginners)
//!
//! `actions-core` turns a WebDriver perform-actions payload into a chain of
//! ticks.  This crate *runs* that chain:
//!
//! 1. Requests against the same session are queued so only one chain runs at
//!    a time ([`application::state::ActionState`]).
//! 2. Ticks run strictly one after another; the actions inside a tick run
//!    concurrently ([`application::tick`]).
//! 3. Every action mutates the device state synchronously and then asks the
//!    host to synthesize one or more events ([`application::dispatch`],
//!    [`application::touch`]).
//! 4. Pointer moves and wheel scrolls are spread over their duration in
//!    ~60 Hz frames ([`application::motion`]).
//!
//! The host is anything that implements [`application::host::ActionsHost`]:
//! a browser bridge in production, an in-memory recorder in tests, or the
//! headless JSON-lines surface used by the replay binary.

/// Application layer: the session state, tick scheduler and dispatch rules.
pub mod application;

/// Infrastructure layer: host surfaces and configuration storage.
pub mod infrastructure;

pub use application::host::ActionsHost;
pub use application::state::ActionState;
