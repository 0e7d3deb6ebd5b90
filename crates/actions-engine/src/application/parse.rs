//! Parsing a perform-actions payload against the session state.

use serde_json::Value;
use tracing::trace;

use actions_core::{parse_chain, ActionError, Chain, Origin};

use super::host::ActionsHost;
use super::state::ActionState;

/// Parses `actions` into a chain and resolves its element origins.
///
/// Parsing registers new devices in the session state even when a later
/// sequence fails to parse.  Element origins are handed to
/// [`ActionsHost::get_element_origin`] once, after the whole payload is
/// known to be well formed.
///
/// # Errors
///
/// [`ActionError::InvalidArgument`] for malformed payloads, or whatever the
/// host returns while resolving an element.
pub async fn parse_actions(
    state: &ActionState,
    host: &dyn ActionsHost,
    actions: &Value,
) -> Result<Chain, ActionError> {
    let mut chain = state.with_input(|input| {
        parse_chain(input, actions, &|value: &Value| host.element_origin(value))
    })?;

    for action in chain.actions_mut() {
        let id = action.id().to_string();
        if let Some(Origin::Element(element)) = action.origin_mut() {
            trace!("Resolving origin {element} of {id}");
            *element = host.get_element_origin(element.clone()).await?;
        }
    }

    Ok(chain)
}
