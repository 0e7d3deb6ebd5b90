//! Transposing per-device sequences into ticks.

use serde_json::Value;
use tracing::debug;

use crate::domain::action::{Chain, Tick};
use crate::domain::input_state::InputState;
use crate::error::ActionError;
use crate::protocol::sequence::parse_sequence;
use crate::protocol::{validate, ElementOrigin};

/// Parses a perform-actions payload (the array of sequences) into a chain.
///
/// Action `i` of every sequence lands in tick `i`; the chain is as long as
/// the longest sequence.  Devices are registered in `state` as they are
/// encountered.
///
/// # Errors
///
/// [`ActionError::InvalidArgument`] if any sequence or action is malformed.
/// Nothing is returned for dispatch in that case.
pub fn parse_chain(
    state: &mut InputState,
    actions: &Value,
    element_origin: &ElementOrigin<'_>,
) -> Result<Chain, ActionError> {
    let sequences = validate::array(Some(actions), "actions")?;

    let mut ticks: Vec<Tick> = Vec::new();
    for sequence in sequences {
        for (i, action) in parse_sequence(state, sequence, element_origin)?
            .into_iter()
            .enumerate()
        {
            if ticks.len() < i + 1 {
                ticks.push(Tick::default());
            }
            ticks[i].0.push(action);
        }
    }

    debug!(
        "Parsed {} sequence(s) into {} tick(s)",
        sequences.len(),
        ticks.len()
    );
    Ok(Chain(ticks))
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::action::Action;
    use crate::domain::origin::{ElementRef, Origin};
    use serde_json::json;

    #[test]
    fn test_sequences_are_transposed_into_ticks() {
        // Arrange
        let mut state = InputState::new();
        let payload = json!([
            {
                "id": "kbd",
                "type": "key",
                "actions": [
                    { "type": "keyDown", "value": "a" },
                    { "type": "keyUp", "value": "a" },
                ],
            },
            {
                "id": "mouse",
                "type": "pointer",
                "actions": [
                    { "type": "pointerMove", "x": 1, "y": 1 },
                    { "type": "pointerDown", "button": 0 },
                    { "type": "pointerUp", "button": 0 },
                ],
            },
        ]);

        // Act
        let chain = parse_chain(&mut state, &payload, &ElementRef::from_web_element).unwrap();

        // Assert
        let shape: Vec<Vec<&str>> = chain
            .ticks()
            .iter()
            .map(|tick| tick.actions().iter().map(|a| a.subtype()).collect())
            .collect();
        assert_eq!(
            shape,
            vec![
                vec!["keyDown", "pointerMove"],
                vec!["keyUp", "pointerDown"],
                vec!["pointerUp"],
            ]
        );
    }

    #[test]
    fn test_element_origin_may_borrow_local_state() {
        // Arrange
        let mut state = InputState::new();
        let known = vec!["button".to_string()];
        let lookup = |value: &Value| {
            value
                .as_str()
                .filter(|id| known.iter().any(|k| k == id))
                .map(|id| ElementRef(id.to_string()))
        };
        let payload = json!([{
            "id": "m",
            "type": "pointer",
            "actions": [ { "type": "pointerMove", "origin": "button", "x": 0, "y": 0 } ],
        }]);

        // Act
        let chain = parse_chain(&mut state, &payload, &lookup).unwrap();

        // Assert
        match &chain.ticks()[0].actions()[0] {
            Action::PointerMove(movement) => {
                assert_eq!(movement.origin, Origin::Element(ElementRef("button".into())));
            }
            other => panic!("expected pointerMove, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_payload_is_empty_chain() {
        let mut state = InputState::new();
        let chain = parse_chain(&mut state, &json!([]), &ElementRef::from_web_element).unwrap();
        assert!(chain.is_empty());
    }

    #[test]
    fn test_non_array_payload_is_invalid() {
        let mut state = InputState::new();
        let err = parse_chain(&mut state, &json!({}), &ElementRef::from_web_element).unwrap_err();
        assert!(matches!(err, ActionError::InvalidArgument(_)));
    }

    #[test]
    fn test_error_in_later_sequence_fails_whole_chain() {
        let mut state = InputState::new();
        let payload = json!([
            { "id": "k", "type": "key", "actions": [ { "type": "keyDown", "value": "a" } ] },
            { "id": "m", "type": "pointer", "actions": [ { "type": "pointerDown" } ] },
        ]);

        let result = parse_chain(&mut state, &payload, &ElementRef::from_web_element);

        assert!(matches!(result, Err(ActionError::InvalidArgument(_))));
    }
}
