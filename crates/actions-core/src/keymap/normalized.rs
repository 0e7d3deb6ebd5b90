//! WebDriver private-use key code points.
//!
//! Source: the "Keyboard actions" table of the W3C WebDriver specification
//! (<https://w3c.github.io/webdriver/#keyboard-actions>).

use super::location::{LEFT, NUMPAD, RIGHT, STANDARD};

/// One row of the special-key table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpecialKey {
    pub raw: char,
    pub key: &'static str,
    pub code: &'static str,
    pub location: u8,
    pub printable: bool,
}

const fn special(raw: char, key: &'static str, code: &'static str, location: u8) -> SpecialKey {
    SpecialKey {
        raw,
        key,
        code,
        location,
        printable: false,
    }
}

const fn printable(raw: char, key: &'static str, code: &'static str, location: u8) -> SpecialKey {
    SpecialKey {
        raw,
        key,
        code,
        location,
        printable: true,
    }
}

/// All private-use key values, sorted by code point.
pub static SPECIAL_KEYS: &[SpecialKey] = &[
    special('\u{E000}', "Unidentified", "", STANDARD),
    special('\u{E001}', "Cancel", "", STANDARD),
    special('\u{E002}', "Help", "Help", STANDARD),
    special('\u{E003}', "Backspace", "Backspace", STANDARD),
    special('\u{E004}', "Tab", "Tab", STANDARD),
    special('\u{E005}', "Clear", "", STANDARD),
    special('\u{E006}', "Enter", "Enter", STANDARD),
    special('\u{E007}', "Enter", "NumpadEnter", NUMPAD),
    special('\u{E008}', "Shift", "ShiftLeft", LEFT),
    special('\u{E009}', "Control", "ControlLeft", LEFT),
    special('\u{E00A}', "Alt", "AltLeft", LEFT),
    special('\u{E00B}', "Pause", "Pause", STANDARD),
    special('\u{E00C}', "Escape", "Escape", STANDARD),
    printable('\u{E00D}', " ", "Space", STANDARD),
    special('\u{E00E}', "PageUp", "PageUp", STANDARD),
    special('\u{E00F}', "PageDown", "PageDown", STANDARD),
    special('\u{E010}', "End", "End", STANDARD),
    special('\u{E011}', "Home", "Home", STANDARD),
    special('\u{E012}', "ArrowLeft", "ArrowLeft", STANDARD),
    special('\u{E013}', "ArrowUp", "ArrowUp", STANDARD),
    special('\u{E014}', "ArrowRight", "ArrowRight", STANDARD),
    special('\u{E015}', "ArrowDown", "ArrowDown", STANDARD),
    special('\u{E016}', "Insert", "Insert", STANDARD),
    special('\u{E017}', "Delete", "Delete", STANDARD),
    printable('\u{E018}', ";", "", STANDARD),
    printable('\u{E019}', "=", "", STANDARD),
    printable('\u{E01A}', "0", "Numpad0", NUMPAD),
    printable('\u{E01B}', "1", "Numpad1", NUMPAD),
    printable('\u{E01C}', "2", "Numpad2", NUMPAD),
    printable('\u{E01D}', "3", "Numpad3", NUMPAD),
    printable('\u{E01E}', "4", "Numpad4", NUMPAD),
    printable('\u{E01F}', "5", "Numpad5", NUMPAD),
    printable('\u{E020}', "6", "Numpad6", NUMPAD),
    printable('\u{E021}', "7", "Numpad7", NUMPAD),
    printable('\u{E022}', "8", "Numpad8", NUMPAD),
    printable('\u{E023}', "9", "Numpad9", NUMPAD),
    printable('\u{E024}', "*", "NumpadMultiply", NUMPAD),
    printable('\u{E025}', "+", "NumpadAdd", NUMPAD),
    printable('\u{E026}', ",", "NumpadComma", NUMPAD),
    printable('\u{E027}', "-", "NumpadSubtract", NUMPAD),
    printable('\u{E028}', ".", "NumpadDecimal", NUMPAD),
    printable('\u{E029}', "/", "NumpadDivide", NUMPAD),
    special('\u{E031}', "F1", "F1", STANDARD),
    special('\u{E032}', "F2", "F2", STANDARD),
    special('\u{E033}', "F3", "F3", STANDARD),
    special('\u{E034}', "F4", "F4", STANDARD),
    special('\u{E035}', "F5", "F5", STANDARD),
    special('\u{E036}', "F6", "F6", STANDARD),
    special('\u{E037}', "F7", "F7", STANDARD),
    special('\u{E038}', "F8", "F8", STANDARD),
    special('\u{E039}', "F9", "F9", STANDARD),
    special('\u{E03A}', "F10", "F10", STANDARD),
    special('\u{E03B}', "F11", "F11", STANDARD),
    special('\u{E03C}', "F12", "F12", STANDARD),
    special('\u{E03D}', "Meta", "MetaLeft", LEFT),
    special('\u{E040}', "ZenkakuHankaku", "Lang1", STANDARD),
    special('\u{E050}', "Shift", "ShiftRight", RIGHT),
    special('\u{E051}', "Control", "ControlRight", RIGHT),
    special('\u{E052}', "Alt", "AltRight", RIGHT),
    special('\u{E053}', "Meta", "MetaRight", RIGHT),
    special('\u{E054}', "PageUp", "Numpad9", NUMPAD),
    special('\u{E055}', "PageDown", "Numpad3", NUMPAD),
    special('\u{E056}', "End", "Numpad1", NUMPAD),
    special('\u{E057}', "Home", "Numpad7", NUMPAD),
    special('\u{E058}', "ArrowLeft", "Numpad4", NUMPAD),
    special('\u{E059}', "ArrowUp", "Numpad8", NUMPAD),
    special('\u{E05A}', "ArrowRight", "Numpad6", NUMPAD),
    special('\u{E05B}', "ArrowDown", "Numpad2", NUMPAD),
    special('\u{E05C}', "Insert", "Numpad0", NUMPAD),
    special('\u{E05D}', "Delete", "NumpadDecimal", NUMPAD),
];

/// Finds the table row for `raw`, which must be exactly one code point.
pub fn lookup(raw: &str) -> Option<&'static SpecialKey> {
    let mut chars = raw.chars();
    let c = chars.next()?;
    if chars.next().is_some() {
        return None;
    }

    SPECIAL_KEYS
        .binary_search_by_key(&c, |k| k.raw)
        .ok()
        .map(|i| &SPECIAL_KEYS[i])
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_sorted_for_binary_search() {
        assert!(SPECIAL_KEYS.windows(2).all(|w| w[0].raw < w[1].raw));
    }

    #[test]
    fn test_lookup_finds_every_row() {
        for row in SPECIAL_KEYS {
            let raw = row.raw.to_string();
            assert_eq!(lookup(&raw), Some(row), "row {:?}", row.raw);
        }
    }

    #[test]
    fn test_lookup_of_gap_code_point_is_none() {
        // U+E02A..U+E030 are unassigned.
        assert_eq!(lookup("\u{E02A}"), None);
    }

    #[test]
    fn test_lookup_rejects_multi_char_strings() {
        assert_eq!(lookup("\u{E008}\u{E008}"), None);
        assert_eq!(lookup(""), None);
    }
}
