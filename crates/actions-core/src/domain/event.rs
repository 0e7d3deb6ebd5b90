//! Event payloads handed to the host for synthesis.
//!
//! The engine never touches a rendering surface itself.  Instead it builds one
//! of these payloads and asks the host to perform the named synthesis
//! operation (see [`SyntheticEvent::operation`]).  Field names serialize in
//! DOM camelCase so a host can forward them to a page unchanged.

use serde::{Deserialize, Serialize};

use crate::domain::action::PointerProperties;
use crate::domain::input_source::{KeyInputSource, PointerInputSource, PointerType};
use crate::keymap::{self, KeyData};

// ── Modifiers ─────────────────────────────────────────────────────────────────

/// UI Events modifier flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    #[serde(rename = "altKey")]
    pub alt: bool,
    #[serde(rename = "shiftKey")]
    pub shift: bool,
    #[serde(rename = "ctrlKey")]
    pub ctrl: bool,
    #[serde(rename = "metaKey")]
    pub meta: bool,
}

impl Modifiers {
    /// Flag-wise OR of `self` and `other`.
    pub fn union(self, other: Modifiers) -> Modifiers {
        Modifiers {
            alt: self.alt || other.alt,
            shift: self.shift || other.shift,
            ctrl: self.ctrl || other.ctrl,
            meta: self.meta || other.meta,
        }
    }
}

/// `MouseEvent.buttons` bit for `button`.
///
/// The DOM swaps the flags of the auxiliary (1) and secondary (2) buttons.
pub fn button_flag(button: u64) -> u32 {
    match button {
        1 => 4,
        2 => 2,
        b if b < 32 => 1 << b,
        _ => 0,
    }
}

/// `MouseEvent.buttons` for every button `pointer` currently holds.
pub fn buttons_mask(pointer: &PointerInputSource) -> u32 {
    pointer.pressed_buttons().fold(0, |mask, b| mask | button_flag(b))
}

/// Secondary ("right") mouse button number.
pub const SECONDARY_BUTTON: u64 = 2;

// ── Key events ────────────────────────────────────────────────────────────────

/// Payload of `synthesizeKeyDown` / `synthesizeKeyUp`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyEventData {
    pub key: String,
    pub code: String,
    pub location: u8,
    pub printable: bool,
    pub repeat: bool,
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

impl KeyEventData {
    /// Builds the payload for `raw`, taking the device's shift state into
    /// account.
    pub fn new(raw: &str, source: &KeyInputSource) -> Self {
        let value = if source.modifiers.shift {
            keymap::shifted_key(raw)
        } else {
            raw.to_string()
        };
        let KeyData {
            key,
            code,
            location,
            printable,
        } = keymap::key_data(&value);

        Self {
            key,
            code,
            location,
            printable,
            repeat: false,
            modifiers: source.modifiers,
        }
    }
}

// ── Mouse events ──────────────────────────────────────────────────────────────

/// DOM event type of a mouse-at-point synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MouseEventKind {
    MouseDown,
    MouseUp,
    MouseMove,
    ContextMenu,
}

/// Payload of `synthesizeMouseAtPoint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MouseEventData {
    #[serde(rename = "type")]
    pub kind: MouseEventKind,
    pub button: u64,
    pub buttons: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub click_count: Option<u32>,
    /// Numeric pointer id of the acting device.
    pub id: u32,
    pub input_source: PointerType,
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

impl MouseEventData {
    /// Builds a payload from the device's current state and the session-wide
    /// modifier flags.
    pub fn new(
        kind: MouseEventKind,
        button: u64,
        pointer: &PointerInputSource,
        modifiers: Modifiers,
    ) -> Self {
        Self {
            kind,
            button,
            buttons: buttons_mask(pointer),
            click_count: None,
            id: pointer.pointer_id,
            input_source: pointer.pointer_type,
            modifiers,
        }
    }
}

// ── Wheel events ──────────────────────────────────────────────────────────────

/// Payload of `synthesizeWheelAtPoint`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WheelEventData {
    pub delta_x: f64,
    pub delta_y: f64,
    pub delta_z: f64,
    /// Always 0 (`DOM_DELTA_PIXEL`).
    pub delta_mode: u32,
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

// ── Touch events ──────────────────────────────────────────────────────────────

/// DOM event type of a multi-touch synthesis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchEventKind {
    TouchStart,
    TouchEnd,
    TouchMove,
}

/// One finger in a composite touch event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TouchContact {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub rx: u64,
    pub ry: u64,
    pub angle: f64,
    pub force: f64,
    pub tilt_x: i64,
    pub tilt_y: i64,
    pub twist: u64,
}

/// Payload of `synthesizeMultiTouch`: every active contact at once.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MultiTouchEventData {
    #[serde(rename = "type")]
    pub kind: TouchEventKind,
    pub buttons: u32,
    pub touches: Vec<TouchContact>,
    #[serde(flatten)]
    pub modifiers: Modifiers,
}

impl MultiTouchEventData {
    pub fn new(kind: TouchEventKind, modifiers: Modifiers) -> Self {
        Self {
            kind,
            buttons: 0,
            touches: Vec::new(),
            modifiers,
        }
    }

    /// Adds one contact at the pointer's current position.
    ///
    /// `properties` is `None` for passive contacts that are held from an
    /// earlier tick and are not acting in this one.
    pub fn add_contact(
        &mut self,
        pointer: &PointerInputSource,
        properties: Option<&PointerProperties>,
    ) {
        let props = properties.cloned().unwrap_or_default();
        let default_force = match self.kind {
            TouchEventKind::TouchEnd => 0.0,
            _ => 1.0,
        };

        self.touches.push(TouchContact {
            id: pointer.pointer_id,
            x: pointer.x,
            y: pointer.y,
            rx: props.width.filter(|w| *w > 0).unwrap_or(1),
            ry: props.height.filter(|h| *h > 0).unwrap_or(1),
            angle: 0.0,
            force: props.pressure.unwrap_or(default_force),
            tilt_x: props.tilt_x.unwrap_or(0),
            tilt_y: props.tilt_y.unwrap_or(0),
            twist: props.twist.unwrap_or(0),
        });
    }

    /// ORs the pointer's held buttons into [`Self::buttons`].
    pub fn merge_buttons(&mut self, pointer: &PointerInputSource) {
        self.buttons |= buttons_mask(pointer);
    }
}

// ── Synthesis requests ────────────────────────────────────────────────────────

/// A request to the host to synthesize one low-level event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SyntheticEvent {
    SynthesizeKeyDown {
        event_data: KeyEventData,
    },
    SynthesizeKeyUp {
        event_data: KeyEventData,
    },
    SynthesizeMouseAtPoint {
        x: f64,
        y: f64,
        event_data: MouseEventData,
    },
    SynthesizeWheelAtPoint {
        x: f64,
        y: f64,
        event_data: WheelEventData,
    },
    SynthesizeMultiTouch {
        event_data: MultiTouchEventData,
    },
}

impl SyntheticEvent {
    /// Name of the synthesis operation the host should perform.
    pub fn operation(&self) -> &'static str {
        match self {
            SyntheticEvent::SynthesizeKeyDown { .. } => "synthesizeKeyDown",
            SyntheticEvent::SynthesizeKeyUp { .. } => "synthesizeKeyUp",
            SyntheticEvent::SynthesizeMouseAtPoint { .. } => "synthesizeMouseAtPoint",
            SyntheticEvent::SynthesizeWheelAtPoint { .. } => "synthesizeWheelAtPoint",
            SyntheticEvent::SynthesizeMultiTouch { .. } => "synthesizeMultiTouch",
        }
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
