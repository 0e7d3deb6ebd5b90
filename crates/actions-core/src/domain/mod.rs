//! Domain entities for the input actions engine.
//!
//! This module contains pure state and data types with no runtime or host
//! dependencies.  Everything here can be unit-tested without a clock, a
//! surface, or an async executor.
//!
//! # How the pieces fit together (for beginners)
//!
//! - An [`input_source::InputSource`] is one virtual device: a keyboard, a
//!   pointer (mouse, pen or touch finger), a wheel, or the "null" device that
//!   only knows how to pause.
//! - [`input_state::InputState`] is the per-session registry of devices.  It
//!   outlives individual requests, so a key pressed by one request is still
//!   held when the next request runs.
//! - An [`action::Action`] is a single step performed by one device.  Actions
//!   are grouped into [`action::Tick`]s, and a request becomes an
//!   [`action::Chain`] of ticks.
//! - [`event`] holds the payloads the engine hands to the host surface.

pub mod action;
pub mod click_tracker;
pub mod event;
pub mod geometry;
pub mod input_source;
pub mod input_state;
pub mod origin;
