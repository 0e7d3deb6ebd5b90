//! Virtual input devices ("input sources").
//!
//! A device is created the first time a request mentions its id and then
//! lives for the rest of the session.  Its kind is fixed at creation: a later
//! request that declares the same id with a different `type` is rejected.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::event::Modifiers;
use crate::domain::geometry::Point;
use crate::error::ActionError;
use crate::keymap::ModifierKey;

// ── Device kinds ──────────────────────────────────────────────────────────────

/// The `type` of an action sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SourceType {
    None,
    Key,
    Pointer,
    Wheel,
}

impl SourceType {
    pub fn as_str(self) -> &'static str {
        match self {
            SourceType::None => "none",
            SourceType::Key => "key",
            SourceType::Pointer => "pointer",
            SourceType::Wheel => "wheel",
        }
    }
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SourceType {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SourceType::None),
            "key" => Ok(SourceType::Key),
            "pointer" => Ok(SourceType::Pointer),
            "wheel" => Ok(SourceType::Wheel),
            other => Err(ActionError::invalid(format!(
                "Expected known action type, got \"{other}\""
            ))),
        }
    }
}

/// The `parameters.pointerType` of a pointer sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PointerType {
    #[default]
    Mouse,
    Pen,
    Touch,
}

impl PointerType {
    pub fn as_str(self) -> &'static str {
        match self {
            PointerType::Mouse => "mouse",
            PointerType::Pen => "pen",
            PointerType::Touch => "touch",
        }
    }
}

impl fmt::Display for PointerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PointerType {
    type Err = ActionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mouse" => Ok(PointerType::Mouse),
            "pen" => Ok(PointerType::Pen),
            "touch" => Ok(PointerType::Touch),
            _ => Err(ActionError::invalid(
                "Expected \"pointerType\" to be one of \"mouse\", \"pen\", or \"touch\"",
            )),
        }
    }
}

// ── Key device ────────────────────────────────────────────────────────────────

/// State of a keyboard-type device.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KeyInputSource {
    /// Normalized key values currently held down.
    pressed: HashSet<String>,
    /// Modifier flags derived from the held modifier keys.
    pub modifiers: Modifiers,
}

impl KeyInputSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_pressed(&self, key: &str) -> bool {
        self.pressed.contains(key)
    }

    /// Adds `key` to the pressed set.  Returns `false` if it was already held.
    pub fn press(&mut self, key: &str) -> bool {
        self.pressed.insert(key.to_string())
    }

    /// Removes `key` from the pressed set.  Returns `true` if it was held.
    pub fn release(&mut self, key: &str) -> bool {
        self.pressed.remove(key)
    }

    pub fn set_modifier(&mut self, modifier: ModifierKey, value: bool) {
        match modifier {
            ModifierKey::Alt => self.modifiers.alt = value,
            ModifierKey::Shift => self.modifiers.shift = value,
            ModifierKey::Control => self.modifiers.ctrl = value,
            ModifierKey::Meta => self.modifiers.meta = value,
        }
    }
}

// ── Pointer device ────────────────────────────────────────────────────────────

/// State of a pointer-type device.
#[derive(Debug, Clone, PartialEq)]
pub struct PointerInputSource {
    pub pointer_type: PointerType,
    /// Numeric pointer id, allocated once per device by
    /// [`InputState::pointer_id`](crate::domain::input_state::InputState::pointer_id).
    pub pointer_id: u32,
    /// Current position in viewport coordinates.
    pub x: f64,
    pub y: f64,
    pressed: BTreeSet<u64>,
}

impl PointerInputSource {
    pub fn new(pointer_type: PointerType, pointer_id: u32) -> Self {
        Self {
            pointer_type,
            pointer_id,
            x: 0.0,
            y: 0.0,
            pressed: BTreeSet::new(),
        }
    }

    pub fn position(&self) -> Point {
        Point::new(self.x, self.y)
    }

    pub fn set_position(&mut self, position: Point) {
        self.x = position.x;
        self.y = position.y;
    }

    pub fn is_pressed(&self, button: u64) -> bool {
        self.pressed.contains(&button)
    }

    pub fn press(&mut self, button: u64) {
        self.pressed.insert(button);
    }

    /// Returns `true` if `button` was held before the release.
    pub fn release(&mut self, button: u64) -> bool {
        self.pressed.remove(&button)
    }

    /// Held buttons in ascending order.
    pub fn pressed_buttons(&self) -> impl Iterator<Item = u64> + '_ {
        self.pressed.iter().copied()
    }
}

// ── Device union ──────────────────────────────────────────────────────────────

/// One virtual input device.
#[derive(Debug, Clone, PartialEq)]
pub enum InputSource {
    /// Not associated with a physical device; only pauses.
    Null,
    Key(KeyInputSource),
    Pointer(PointerInputSource),
    /// Wheel devices carry no state between ticks.
    Wheel,
}

impl InputSource {
    pub fn source_type(&self) -> SourceType {
        match self {
            InputSource::Null => SourceType::None,
            InputSource::Key(_) => SourceType::Key,
            InputSource::Pointer(_) => SourceType::Pointer,
            InputSource::Wheel => SourceType::Wheel,
        }
    }

    pub fn as_key(&self) -> Option<&KeyInputSource> {
        match self {
            InputSource::Key(key) => Some(key),
            _ => None,
        }
    }

    pub fn as_pointer(&self) -> Option<&PointerInputSource> {
        match self {
            InputSource::Pointer(pointer) => Some(pointer),
            _ => None,
        }
    }

    /// `true` for pointer devices of kind touch.
    pub fn is_touch(&self) -> bool {
        matches!(
            self,
            InputSource::Pointer(PointerInputSource { pointer_type: PointerType::Touch, .. })
        )
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
