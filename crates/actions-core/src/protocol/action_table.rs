//! Read-only lookup table from (device type, subtype) to action parser.
//!
//! The table is a `static` slice built at compile time.  Pause is registered
//! under the "none" device type only; [`lookup`] falls back to the "none"
//! rows so that every device can pause.

use serde_json::{Map, Value};
use unicode_segmentation::UnicodeSegmentation;

use crate::domain::action::{
    Action, KeyAction, PauseAction, PointerButtonAction, PointerMoveAction, PointerProperties,
    WheelScrollAction,
};
use crate::domain::input_source::SourceType;
use crate::domain::origin::Origin;
use crate::error::ActionError;
use crate::protocol::validate;
use crate::protocol::ElementOrigin;

/// Signature shared by every action parser.
pub type ActionParser =
    fn(id: &str, item: &Map<String, Value>, element_origin: &ElementOrigin<'_>) -> Result<Action, ActionError>;

/// One row of [`ACTION_TABLE`].
pub struct ActionEntry {
    pub source_type: SourceType,
    pub subtype: &'static str,
    pub parse: ActionParser,
}

pub static ACTION_TABLE: &[ActionEntry] = &[
    ActionEntry {
        source_type: SourceType::None,
        subtype: "pause",
        parse: parse_pause,
    },
    ActionEntry {
        source_type: SourceType::Key,
        subtype: "keyDown",
        parse: parse_key_down,
    },
    ActionEntry {
        source_type: SourceType::Key,
        subtype: "keyUp",
        parse: parse_key_up,
    },
    ActionEntry {
        source_type: SourceType::Pointer,
        subtype: "pointerDown",
        parse: parse_pointer_down,
    },
    ActionEntry {
        source_type: SourceType::Pointer,
        subtype: "pointerUp",
        parse: parse_pointer_up,
    },
    ActionEntry {
        source_type: SourceType::Pointer,
        subtype: "pointerMove",
        parse: parse_pointer_move,
    },
    ActionEntry {
        source_type: SourceType::Wheel,
        subtype: "scroll",
        parse: parse_scroll,
    },
];

/// Parser for `subtype` on a device of `source_type`, falling back to the
/// device-independent "none" rows.
pub fn lookup(source_type: SourceType, subtype: &str) -> Option<ActionParser> {
    let find = |wanted: SourceType| {
        ACTION_TABLE
            .iter()
            .find(|entry| entry.source_type == wanted && entry.subtype == subtype)
            .map(|entry| entry.parse)
    };

    find(source_type).or_else(|| find(SourceType::None))
}

// ── Parsers ───────────────────────────────────────────────────────────────────

fn parse_pause(
    id: &str,
    item: &Map<String, Value>,
    _: &ElementOrigin<'_>,
) -> Result<Action, ActionError> {
    Ok(Action::Pause(PauseAction {
        id: id.to_string(),
        duration: validate::optional(item, "duration", validate::non_negative_integer)?,
    }))
}

fn parse_key(id: &str, item: &Map<String, Value>) -> Result<KeyAction, ActionError> {
    let value = item.get("value");
    let invalid = || {
        ActionError::invalid(format!(
            "Expected \"value\" to be a string that represents single code point or grapheme cluster, got {}",
            value.map_or_else(|| "undefined".to_string(), Value::to_string)
        ))
    };

    let key = value.and_then(Value::as_str).ok_or_else(invalid)?;
    if key.graphemes(true).count() != 1 {
        return Err(invalid());
    }

    Ok(KeyAction {
        id: id.to_string(),
        value: key.to_string(),
    })
}

fn parse_key_down(
    id: &str,
    item: &Map<String, Value>,
    _: &ElementOrigin<'_>,
) -> Result<Action, ActionError> {
    parse_key(id, item).map(Action::KeyDown)
}

fn parse_key_up(
    id: &str,
    item: &Map<String, Value>,
    _: &ElementOrigin<'_>,
) -> Result<Action, ActionError> {
    parse_key(id, item).map(Action::KeyUp)
}

/// Contact geometry and pen properties shared by every pointer action.
fn parse_properties(item: &Map<String, Value>) -> Result<PointerProperties, ActionError> {
    use std::f64::consts::PI;

    Ok(PointerProperties {
        width: validate::optional(item, "width", validate::non_negative_integer)?,
        height: validate::optional(item, "height", validate::non_negative_integer)?,
        pressure: validate::optional(item, "pressure", |v, n| {
            validate::number_in_range(v, n, 0.0, 1.0)
        })?,
        tangential_pressure: validate::optional(item, "tangentialPressure", |v, n| {
            validate::number_in_range(v, n, -1.0, 1.0)
        })?,
        tilt_x: validate::optional(item, "tiltX", |v, n| {
            validate::integer_in_range(v, n, -90, 90)
        })?,
        tilt_y: validate::optional(item, "tiltY", |v, n| {
            validate::integer_in_range(v, n, -90, 90)
        })?,
        twist: validate::optional(item, "twist", |v, n| {
            validate::integer_in_range(v, n, 0, 359).map(|t| t as u64)
        })?,
        altitude_angle: validate::optional(item, "altitudeAngle", |v, n| {
            validate::number_in_range(v, n, 0.0, PI / 2.0)
        })?,
        azimuth_angle: validate::optional(item, "azimuthAngle", |v, n| {
            validate::number_in_range(v, n, 0.0, 2.0 * PI)
        })?,
    })
}

fn parse_button(id: &str, item: &Map<String, Value>) -> Result<PointerButtonAction, ActionError> {
    Ok(PointerButtonAction {
        id: id.to_string(),
        button: validate::non_negative_integer(item.get("button"), "button")?,
        properties: parse_properties(item)?,
    })
}

fn parse_pointer_down(
    id: &str,
    item: &Map<String, Value>,
    _: &ElementOrigin<'_>,
) -> Result<Action, ActionError> {
    parse_button(id, item).map(Action::PointerDown)
}

fn parse_pointer_up(
    id: &str,
    item: &Map<String, Value>,
    _: &ElementOrigin<'_>,
) -> Result<Action, ActionError> {
    parse_button(id, item).map(Action::PointerUp)
}

/// `undefined` / `"viewport"`, `"pointer"`, or a web element reference.
fn parse_origin(
    value: Option<&Value>,
    element_origin: &ElementOrigin<'_>,
) -> Result<Origin, ActionError> {
    match value {
        None => Ok(Origin::Viewport),
        Some(Value::String(s)) if s == "viewport" => Ok(Origin::Viewport),
        Some(Value::String(s)) if s == "pointer" => Ok(Origin::Pointer),
        Some(other) => element_origin(other).map(Origin::Element).ok_or_else(|| {
            ActionError::invalid(format!(
                "Expected \"origin\" to be undefined, \"viewport\", \"pointer\", or an element, got: {other}"
            ))
        }),
    }
}

fn parse_pointer_move(
    id: &str,
    item: &Map<String, Value>,
    element_origin: &ElementOrigin<'_>,
) -> Result<Action, ActionError> {
    Ok(Action::PointerMove(PointerMoveAction {
        id: id.to_string(),
        duration: validate::optional(item, "duration", validate::non_negative_integer)?,
        origin: parse_origin(item.get("origin"), element_origin)?,
        x: validate::number(item.get("x"), "x")?,
        y: validate::number(item.get("y"), "y")?,
        properties: parse_properties(item)?,
    }))
}

fn parse_scroll(
    id: &str,
    item: &Map<String, Value>,
    element_origin: &ElementOrigin<'_>,
) -> Result<Action, ActionError> {
    let duration = validate::optional(item, "duration", validate::non_negative_integer)?;
    let origin = parse_origin(item.get("origin"), element_origin)?;
    if origin.is_pointer() {
        return Err(ActionError::invalid(
            "\"pointer\" origin not supported for \"scroll\" action",
        ));
    }

    Ok(Action::Scroll(WheelScrollAction {
        id: id.to_string(),
        duration,
        origin,
        x: validate::integer(item.get("x"), "x")?,
        y: validate::integer(item.get("y"), "y")?,
        delta_x: validate::integer(item.get("deltaX"), "deltaX")?,
        delta_y: validate::integer(item.get("deltaY"), "deltaY")?,
    }))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::origin::{ElementRef, WEB_ELEMENT_IDENTIFIER};
    use serde_json::json;

    fn no_elements(_: &Value) -> Option<ElementRef> {
        None
    }

    fn parse(source_type: SourceType, item: Value) -> Result<Action, ActionError> {
        let item = item.as_object().cloned().unwrap_or_default();
        let subtype = item["type"].as_str().unwrap_or_default().to_string();
        let parser = lookup(source_type, &subtype).expect("known subtype");
        parser("dev", &item, &ElementRef::from_web_element)
    }

    #[test]
    fn test_pause_is_available_for_every_device_type() {
        for source_type in [
            SourceType::None,
            SourceType::Key,
            SourceType::Pointer,
            SourceType::Wheel,
        ] {
            assert!(lookup(source_type, "pause").is_some(), "{source_type}");
        }
    }

    #[test]
    fn test_subtypes_are_device_specific() {
        assert!(lookup(SourceType::Key, "pointerDown").is_none());
        assert!(lookup(SourceType::None, "keyDown").is_none());
        assert!(lookup(SourceType::Wheel, "scroll").is_some());
    }

    #[test]
    fn test_key_value_must_be_single_grapheme() {
        assert!(parse(SourceType::Key, json!({"type": "keyDown", "value": "ab"})).is_err());
        assert!(parse(SourceType::Key, json!({"type": "keyDown", "value": ""})).is_err());
        // A family emoji is several code points but one grapheme cluster.
        let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        assert!(parse(SourceType::Key, json!({"type": "keyDown", "value": family})).is_ok());
    }

    #[test]
    fn test_pointer_move_parses_properties_and_origin() {
        // Arrange
        let item = json!({
            "type": "pointerMove",
            "x": 10.5,
            "y": 20,
            "duration": 100,
            "origin": "pointer",
            "pressure": 0.5,
            "twist": 45,
        });

        // Act
        let action = parse(SourceType::Pointer, item).unwrap();

        // Assert
        let Action::PointerMove(mv) = action else {
            panic!("expected pointerMove");
        };
        assert_eq!((mv.x, mv.y), (10.5, 20.0));
        assert_eq!(mv.duration, Some(100));
        assert_eq!(mv.origin, Origin::Pointer);
        assert_eq!(mv.properties.pressure, Some(0.5));
        assert_eq!(mv.properties.twist, Some(45));
    }

    #[test]
    fn test_element_origin_is_recognised() {
        let item = json!({
            "type": "pointerMove",
            "x": 0,
            "y": 0,
            "origin": { WEB_ELEMENT_IDENTIFIER: "e1" },
        });
        let action = parse(SourceType::Pointer, item).unwrap();
        assert_eq!(
            action.origin(),
            Some(&Origin::Element(ElementRef("e1".into())))
        );
    }

    #[test]
    fn test_unknown_origin_is_invalid() {
        let item = json!({"type": "pointerMove", "x": 0, "y": 0, "origin": "page"})
            .as_object()
            .cloned()
            .unwrap();
        let err = parse_pointer_move("dev", &item, &no_elements).unwrap_err();
        assert!(matches!(err, ActionError::InvalidArgument(_)));
    }

    #[test]
    fn test_out_of_range_properties_are_rejected() {
        for (field, value) in [
            ("pressure", json!(1.5)),
            ("tangentialPressure", json!(-2)),
            ("tiltX", json!(91)),
            ("tiltY", json!(-91)),
            ("twist", json!(360)),
            ("altitudeAngle", json!(2.0)),
            ("azimuthAngle", json!(7.0)),
            ("width", json!(-1)),
        ] {
            let mut item = json!({"type": "pointerDown", "button": 0});
            item[field] = value;
            assert!(
                parse(SourceType::Pointer, item).is_err(),
                "{field} should be rejected"
            );
        }
    }

    #[test]
    fn test_scroll_rejects_pointer_origin_and_fractional_deltas() {
        let pointer_origin = json!({
            "type": "scroll", "x": 0, "y": 0, "deltaX": 0, "deltaY": 5, "origin": "pointer"
        });
        let fractional = json!({
            "type": "scroll", "x": 0, "y": 0, "deltaX": 0, "deltaY": 5.5
        });

        assert!(parse(SourceType::Wheel, pointer_origin).is_err());
        assert!(parse(SourceType::Wheel, fractional).is_err());
    }

    #[test]
    fn test_pointer_move_requires_finite_coordinates() {
        let missing_y = json!({"type": "pointerMove", "x": 1});
        assert!(parse(SourceType::Pointer, missing_y).is_err());
    }
}
