//! Dispatch-time resolution of action origins into viewport coordinates.

use tracing::trace;

use actions_core::{ActionError, Origin, Point};

use super::host::ActionsHost;

/// Resolves `origin` plus `offset` into absolute viewport coordinates.
///
/// `current` is the acting pointer's position; it is only used for
/// [`Origin::Pointer`].
///
/// # Errors
///
/// [`ActionError::MoveTargetOutOfBounds`] when an element origin has no
/// client rects, plus whatever the host returns while measuring it.
pub async fn target_coordinates(
    host: &dyn ActionsHost,
    origin: &Origin,
    current: Point,
    offset: Point,
) -> Result<Point, ActionError> {
    let base = match origin {
        Origin::Viewport => Point::ORIGIN,
        Origin::Pointer => current,
        Origin::Element(element) => {
            let rects = host.get_client_rects(element).await?;
            let Some(first) = rects.first() else {
                return Err(ActionError::MoveTargetOutOfBounds(format!(
                    "Origin {element} is not displayed"
                )));
            };
            let centre = host.get_in_view_centre_point(first).await?;
            trace!("Resolved {element} to in-view centre {centre:?}");
            centre
        }
    };

    Ok(base.offset_by(offset))
}
