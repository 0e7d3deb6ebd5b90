//! The collaborator interface between the engine and its host.
//!
//! The engine never touches a page or a window.  Every question about the
//! outside world (where is this element? is this point visible?) and every
//! side effect (synthesize this event) goes through [`ActionsHost`].  Hosts
//! live in the infrastructure layer; the engine treats them as black boxes.

use async_trait::async_trait;
use serde_json::Value;

use actions_core::{ActionError, ElementRef, Point, Rect, SyntheticEvent};

/// Host-provided operations used while parsing and dispatching actions.
#[async_trait]
pub trait ActionsHost: Send + Sync {
    /// Returns the element reference if `value` denotes an element origin.
    ///
    /// The default recognises W3C web element references.
    fn element_origin(&self, value: &Value) -> Option<ElementRef> {
        ElementRef::from_web_element(value)
    }

    /// Resolves a parsed element reference to the host's own handle.
    ///
    /// # Errors
    ///
    /// Typically [`ActionError::NoSuchElement`] when the element is unknown.
    async fn get_element_origin(&self, element: ElementRef) -> Result<ElementRef, ActionError> {
        Ok(element)
    }

    /// Fails with [`ActionError::MoveTargetOutOfBounds`] when `target` lies
    /// outside the current viewport.
    async fn assert_in_viewport(&self, target: Point) -> Result<(), ActionError>;

    /// Synthesizes one event; [`SyntheticEvent::operation`] names the
    /// synthesis primitive.
    async fn dispatch_event(&self, event: SyntheticEvent) -> Result<(), ActionError>;

    /// Client rects of `element`, empty when it is not rendered.
    async fn get_client_rects(&self, element: &ElementRef) -> Result<Vec<Rect>, ActionError>;

    /// In-view centre point of `rect`.
    async fn get_in_view_centre_point(&self, rect: &Rect) -> Result<Point, ActionError>;

    /// `true` where Ctrl + primary click acts as a secondary click.
    fn ctrl_click_is_secondary(&self) -> bool {
        cfg!(target_os = "macos")
    }
}
