//! # actions-core
//!
//! Shared library for the WebDriver input actions engine containing the
//! virtual input device model, the action taxonomy, normalized key data, and
//! the JSON protocol parser that turns an action request into a chain of ticks.
//!
//! This crate has no async runtime and no knowledge of the surface that
//! eventually receives the synthesized events.
//!
//! # Architecture overview (for beginners)
//!
//! The WebDriver "Actions" command lets a client describe synthetic user input
//! declaratively: "device `mouse1` moves to (10, 10), presses button 0, then
//! releases it" while "device `kbd` holds Shift".  Each device contributes one
//! *sequence* of actions; the engine replays all sequences side by side, one
//! *tick* at a time.
//!
//! This crate (`actions-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – The virtual devices (`InputSource`), the session-wide
//!   `InputState` that tracks them, the closed `Action` enum, coordinate
//!   origins, and the event payloads handed to the host for synthesis.
//!
//! - **`keymap`** – Normalized key data: how a raw WebDriver key value such as
//!   `"\u{E008}"` maps to a DOM `key` ("Shift"), `code` ("ShiftLeft") and
//!   location, plus the shifted-character table.
//!
//! - **`protocol`** – How JSON travels in.  A request is validated field by
//!   field and unmarshalled into typed actions, then transposed into ticks.

pub mod domain;
pub mod error;
pub mod keymap;
pub mod protocol;

// Re-export the most-used types at the crate root so callers can write
// `actions_core::Chain` instead of `actions_core::domain::action::Chain`.
pub use domain::action::{
    Action, Chain, KeyAction, PauseAction, PointerButtonAction, PointerMoveAction,
    PointerProperties, Tick, WheelScrollAction,
};
pub use domain::click_tracker::{ClickTracker, CLICK_INTERVAL};
pub use domain::event::{
    KeyEventData, Modifiers, MouseEventData, MultiTouchEventData, SyntheticEvent, TouchContact,
    WheelEventData,
};
pub use domain::geometry::{assert_target_in_viewport, Point, Rect, Viewport};
pub use domain::input_source::{
    InputSource, KeyInputSource, PointerInputSource, PointerType, SourceType,
};
pub use domain::input_state::InputState;
pub use domain::origin::{ElementRef, Origin, WEB_ELEMENT_IDENTIFIER};
pub use error::ActionError;
pub use protocol::chain::parse_chain;
