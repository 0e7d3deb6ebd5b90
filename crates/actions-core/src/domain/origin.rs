//! Coordinate origins for pointer moves and wheel scrolls.
//!
//! The *kind* of origin is fixed when the request is parsed.  The actual
//! coordinates are only resolved when the action runs, because a pointer
//! origin depends on where the pointer is at that moment and an element may
//! move between parse and dispatch.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// JSON key that marks a web element reference.
///
/// See <https://w3c.github.io/webdriver/#dfn-web-element-identifier>.
pub const WEB_ELEMENT_IDENTIFIER: &str = "element-6066-11e4-a52e-4f735466cecf";

/// Opaque reference to an element, as handed out by the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ElementRef(pub String);

impl ElementRef {
    /// Extracts the reference from `{"element-6066-…": "<id>"}`.
    pub fn from_web_element(value: &Value) -> Option<ElementRef> {
        value
            .as_object()?
            .get(WEB_ELEMENT_IDENTIFIER)?
            .as_str()
            .map(|id| ElementRef(id.to_string()))
    }
}

impl fmt::Display for ElementRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "element {}", self.0)
    }
}

/// Reference point that an action's `(x, y)` is relative to.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Origin {
    /// `(x, y)` are absolute viewport coordinates.
    #[default]
    Viewport,
    /// `(x, y)` are relative to the acting pointer's current position.
    Pointer,
    /// `(x, y)` are relative to the in-view centre of the element's first
    /// client rect.
    Element(ElementRef),
}

impl Origin {
    pub fn is_pointer(&self) -> bool {
        matches!(self, Origin::Pointer)
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
