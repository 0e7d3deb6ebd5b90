//! Parsing of one per-device action sequence.

use serde_json::Value;
use tracing::trace;

use crate::domain::action::Action;
use crate::domain::input_source::{PointerType, SourceType};
use crate::domain::input_state::InputState;
use crate::error::ActionError;
use crate::protocol::{action_table, validate, ElementOrigin};

/// Validates `{id, type, parameters?, actions}`, registers the device in
/// `state` and returns the sequence's actions in order.
///
/// # Errors
///
/// [`ActionError::InvalidArgument`] for any malformed field, an unknown
/// device type or subtype, or a device id re-declared with another type.
pub fn parse_sequence(
    state: &mut InputState,
    sequence: &Value,
    element_origin: &ElementOrigin<'_>,
) -> Result<Vec<Action>, ActionError> {
    let sequence = validate::object(Some(sequence), "actions item")?;
    let id = validate::string(sequence.get("id"), "id")?;
    let source_type: SourceType = validate::string(sequence.get("type"), "type")?.parse()?;
    let items = validate::array(sequence.get("actions"), "actions")?;

    let pointer_type = match source_type {
        SourceType::Pointer => parse_pointer_type(sequence.get("parameters"))?,
        _ => PointerType::default(),
    };

    state.get_or_add(id, source_type, pointer_type)?;

    let mut actions = Vec::with_capacity(items.len());
    for item in items {
        let item = validate::object(Some(item), "action")?;
        let subtype = item.get("type").and_then(Value::as_str).unwrap_or_default();
        let parse = action_table::lookup(source_type, subtype).ok_or_else(|| {
            ActionError::invalid(format!(
                "Expected known subtype for type {source_type}, got {}",
                item.get("type").map_or_else(|| "undefined".to_string(), Value::to_string)
            ))
        })?;
        actions.push(parse(id, item, element_origin)?);
    }

    trace!("Parsed {} action(s) for {source_type} input source {id}", actions.len());
    Ok(actions)
}

/// Reads `parameters.pointerType`, defaulting to mouse.
fn parse_pointer_type(parameters: Option<&Value>) -> Result<PointerType, ActionError> {
    let Some(parameters) = parameters else {
        return Ok(PointerType::Mouse);
    };
    let parameters = validate::object(Some(parameters), "parameters")?;

    match parameters.get("pointerType") {
        None => Ok(PointerType::Mouse),
        value => validate::string(value, "pointerType")?.parse(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
