//! Integration tests for action chain parsing.
//!
//! These tests drive the public API the way the engine does: one
//! `InputState` shared across several requests, with payloads shaped like
//! real WebDriver perform-actions bodies.

use actions_core::{
    parse_chain, Action, ActionError, ElementRef, InputState, Origin, PointerType, SourceType,
    WEB_ELEMENT_IDENTIFIER,
};
use serde_json::json;

fn parse(state: &mut InputState, payload: serde_json::Value) -> Result<actions_core::Chain, ActionError> {
    parse_chain(state, &payload, &ElementRef::from_web_element)
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[test]
fn test_device_state_survives_between_requests() {
    // Arrange
    let mut state = InputState::new();
    parse(
        &mut state,
        json!([{ "id": "m1", "type": "pointer", "actions": [] }]),
    )
    .expect("first request must parse");

    // Act
    parse(
        &mut state,
        json!([
            { "id": "m2", "type": "pointer", "actions": [] },
            { "id": "t1", "type": "pointer", "parameters": { "pointerType": "touch" }, "actions": [] },
        ]),
    )
    .expect("second request must parse");

    // Assert
    let ids: Vec<(String, u32)> = state
        .sources_by_type(SourceType::Pointer)
        .map(|(id, source)| (id.to_string(), source.as_pointer().unwrap().pointer_id))
        .collect();
    assert_eq!(
        ids,
        vec![
            ("m1".to_string(), 0),
            ("m2".to_string(), 1),
            ("t1".to_string(), 2)
        ]
    );
}

#[test]
fn test_reused_id_with_other_pointer_type_is_rejected() {
    let mut state = InputState::new();
    parse(
        &mut state,
        json!([{ "id": "p", "type": "pointer", "parameters": { "pointerType": "pen" }, "actions": [] }]),
    )
    .unwrap();

    let err = parse(
        &mut state,
        json!([{ "id": "p", "type": "pointer", "actions": [] }]),
    )
    .unwrap_err();

    assert_eq!(err.error_code(), "invalid argument");
    assert_eq!(
        state.pointer_source("p").unwrap().pointer_type,
        PointerType::Pen
    );
}

#[test]
fn test_mixed_request_keeps_origins_unresolved() {
    // Arrange
    let mut state = InputState::new();
    let payload = json!([
        {
            "id": "wheel",
            "type": "wheel",
            "actions": [
                { "type": "scroll", "x": 5, "y": 5, "deltaX": 0, "deltaY": 100, "duration": 50,
                  "origin": { WEB_ELEMENT_IDENTIFIER: "list" } },
            ],
        },
        {
            "id": "mouse",
            "type": "pointer",
            "actions": [
                { "type": "pause" },
                { "type": "pointerMove", "x": -5, "y": 0, "origin": "pointer" },
            ],
        },
    ]);

    // Act
    let chain = parse(&mut state, payload).unwrap();

    // Assert
    assert_eq!(chain.len(), 2);
    let first = &chain.ticks()[0];
    assert_eq!(first.duration(), 50);
    assert!(matches!(
        first.actions()[0].origin(),
        Some(Origin::Element(ElementRef(id))) if id == "list"
    ));
    let Action::PointerMove(mv) = &chain.ticks()[1].actions()[0] else {
        panic!("expected pointerMove in second tick");
    };
    assert_eq!(mv.origin, Origin::Pointer);
    assert_eq!(mv.x, -5.0);
}

#[test]
fn test_key_values_with_private_use_characters_parse() {
    let mut state = InputState::new();
    let chain = parse(
        &mut state,
        json!([{
            "id": "kbd",
            "type": "key",
            "actions": [
                { "type": "keyDown", "value": "\u{E008}" },
                { "type": "keyDown", "value": "é" },
            ],
        }]),
    )
    .unwrap();

    assert_eq!(chain.len(), 2);
}

#[test]
fn test_none_sequence_accepts_only_pauses() {
    let mut state = InputState::new();

    let ok = parse(
        &mut state,
        json!([{ "id": "idle", "type": "none", "actions": [{ "type": "pause", "duration": 10 }] }]),
    );
    let err = parse(
        &mut state,
        json!([{ "id": "idle", "type": "none", "actions": [{ "type": "keyDown", "value": "a" }] }]),
    );

    assert!(ok.is_ok());
    assert!(matches!(err, Err(ActionError::InvalidArgument(_))));
}
