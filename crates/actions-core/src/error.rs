//! Error type shared by parsing and dispatch.
//!
//! Parsing only ever produces [`ActionError::InvalidArgument`].  Dispatch can
//! additionally fail with [`ActionError::MoveTargetOutOfBounds`] or with
//! whatever the host reports while resolving elements or synthesizing events.

use thiserror::Error;

/// Error type for action parsing and dispatch.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ActionError {
    /// A protocol field is missing, has the wrong type, or is out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A resolved target lies outside the viewport, or an element origin has
    /// no client rects.
    #[error("move target out of bounds: {0}")]
    MoveTargetOutOfBounds(String),

    /// The host could not resolve an element origin.
    #[error("no such element: {0}")]
    NoSuchElement(String),

    /// The host failed to synthesize an event.
    #[error("event dispatch failed: {0}")]
    Dispatch(String),

    /// An engine invariant was violated.  Never caused by user input.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ActionError {
    /// Returns the WebDriver error code for this error.
    ///
    /// See <https://w3c.github.io/webdriver/#errors>.
    pub fn error_code(&self) -> &'static str {
        match self {
            ActionError::InvalidArgument(_) => "invalid argument",
            ActionError::MoveTargetOutOfBounds(_) => "move target out of bounds",
            ActionError::NoSuchElement(_) => "no such element",
            ActionError::Dispatch(_) | ActionError::Internal(_) => "unknown error",
        }
    }

    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        ActionError::InvalidArgument(message.into())
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
