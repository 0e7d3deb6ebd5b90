//! US QWERTY physical layout: DOM `code` values for printable characters and
//! the characters produced with Shift held.

/// (unshifted, shifted, code) for every non-letter key on the main block.
static SYMBOL_KEYS: &[(&str, &str, &str)] = &[
    ("`", "~", "Backquote"),
    ("1", "!", "Digit1"),
    ("2", "@", "Digit2"),
    ("3", "#", "Digit3"),
    ("4", "$", "Digit4"),
    ("5", "%", "Digit5"),
    ("6", "^", "Digit6"),
    ("7", "&", "Digit7"),
    ("8", "*", "Digit8"),
    ("9", "(", "Digit9"),
    ("0", ")", "Digit0"),
    ("-", "_", "Minus"),
    ("=", "+", "Equal"),
    ("[", "{", "BracketLeft"),
    ("]", "}", "BracketRight"),
    ("\\", "|", "Backslash"),
    (";", ":", "Semicolon"),
    ("'", "\"", "Quote"),
    (",", "<", "Comma"),
    (".", ">", "Period"),
    ("/", "?", "Slash"),
];

/// DOM `code` of the key that produces `raw`, shifted or not.
pub fn code_for(raw: &str) -> Option<String> {
    let c = single_char(raw)?;

    if c.is_ascii_alphabetic() {
        return Some(format!("Key{}", c.to_ascii_uppercase()));
    }
    if c == ' ' {
        return Some("Space".to_string());
    }

    SYMBOL_KEYS
        .iter()
        .find(|(plain, shifted, _)| *plain == raw || *shifted == raw)
        .map(|(_, _, code)| (*code).to_string())
}

/// Character produced by `raw` with Shift held, if the layout defines one.
pub fn shifted(raw: &str) -> Option<&'static str> {
    let c = single_char(raw)?;

    if c.is_ascii_lowercase() {
        return UPPERCASE
            .get((c as u8 - b'a') as usize)
            .copied();
    }

    SYMBOL_KEYS
        .iter()
        .find(|(plain, _, _)| *plain == raw)
        .map(|(_, shifted, _)| *shifted)
}

static UPPERCASE: [&str; 26] = [
    "A", "B", "C", "D", "E", "F", "G", "H", "I", "J", "K", "L", "M", "N", "O", "P", "Q", "R",
    "S", "T", "U", "V", "W", "X", "Y", "Z",
];

fn single_char(raw: &str) -> Option<char> {
    let mut chars = raw.chars();
    let c = chars.next()?;
    chars.next().is_none().then_some(c)
}

// ── Tests ─────────────────────────────────────────────────────────────────────
