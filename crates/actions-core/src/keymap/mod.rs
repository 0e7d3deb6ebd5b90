//! Key data for WebDriver key values.
//!
//! # Why a key table? (for beginners)
//!
//! A WebDriver client names keys with a single character.  Ordinary characters
//! stand for themselves ("a", "7", "€"), while special keys such as Enter or
//! Shift are encoded as code points in the Unicode private-use area
//! U+E000–U+E05D.  Before the engine can synthesize a DOM `KeyboardEvent` it
//! needs three more facts about a key:
//!
//! - the **normalized key value** (`"\u{E008}"` → `"Shift"`),
//! - the **physical code** (`"a"` → `"KeyA"`, `"\u{E050}"` → `"ShiftRight"`),
//! - the **location** (left / right modifier, numpad, or standard).
//!
//! [`normalized`] holds the private-use table and [`us_layout`] the physical
//! layout used for printable characters, including the shifted variants that
//! apply while a Shift key is held.

pub mod normalized;
pub mod us_layout;

/// Key location constants as used by `KeyboardEvent.location`.
pub mod location {
    pub const STANDARD: u8 = 0;
    pub const LEFT: u8 = 1;
    pub const RIGHT: u8 = 2;
    pub const NUMPAD: u8 = 3;
}

/// Everything needed to synthesize a key event for one key value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyData {
    /// Normalized DOM `key` value.
    pub key: String,
    /// DOM `code` value; empty when the key has no physical code.
    pub code: String,
    pub location: u8,
    /// `true` when the key produces a character.
    pub printable: bool,
}

/// The four modifier keys tracked per key device.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ModifierKey {
    Alt,
    Shift,
    Control,
    Meta,
}

/// Returns the modifier a normalized key value stands for, if any.
pub fn modifier_key(key: &str) -> Option<ModifierKey> {
    match key {
        "Alt" => Some(ModifierKey::Alt),
        "Shift" => Some(ModifierKey::Shift),
        "Control" => Some(ModifierKey::Control),
        "Meta" => Some(ModifierKey::Meta),
        _ => None,
    }
}

/// Looks up key data for a raw WebDriver key value.
pub fn key_data(raw: &str) -> KeyData {
    if let Some(special) = normalized::lookup(raw) {
        return KeyData {
            key: special.key.to_string(),
            code: special.code.to_string(),
            location: special.location,
            printable: special.printable,
        };
    }

    KeyData {
        key: raw.to_string(),
        code: us_layout::code_for(raw).unwrap_or_default(),
        location: location::STANDARD,
        printable: true,
    }
}

/// Value produced by `raw` while Shift is held.
///
/// Special keys and characters without a shifted variant are returned
/// unchanged.
pub fn shifted_key(raw: &str) -> String {
    us_layout::shifted(raw)
        .map(str::to_string)
        .unwrap_or_else(|| raw.to_string())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
