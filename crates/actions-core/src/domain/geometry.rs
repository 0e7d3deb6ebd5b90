//! Viewport coordinates, rectangles, and the interpolation used by
//! move-over-time.

use serde::{Deserialize, Serialize};

use crate::error::ActionError;

/// A position in viewport coordinates (CSS pixels).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns `self` shifted by `offset`.
    pub fn offset_by(self, offset: Point) -> Point {
        Point::new(self.x + offset.x, self.y + offset.y)
    }
}

/// An axis-aligned rectangle, as returned by `getClientRects()`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// Centre of the part of this rectangle that lies inside `viewport`.
    ///
    /// Falls back to the plain centre when the rectangle does not intersect
    /// the viewport at all.
    pub fn in_view_centre(&self, viewport: Viewport) -> Point {
        let left = self.x.min(self.x + self.width).max(0.0);
        let right = self.x.max(self.x + self.width).min(viewport.width);
        let top = self.y.min(self.y + self.height).max(0.0);
        let bottom = self.y.max(self.y + self.height).min(viewport.height);

        if left > right || top > bottom {
            return Point::new(
                self.x + self.width / 2.0,
                self.y + self.height / 2.0,
            );
        }

        Point::new(((left + right) / 2.0).floor(), ((top + bottom) / 2.0).floor())
    }
}

/// Dimensions of the visible viewport, scrollbars included.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// Asserts that `target` lies inside `viewport`.
///
/// Both edges are inclusive: `(width, height)` is still in bounds.
///
/// # Errors
///
/// Returns [`ActionError::InvalidArgument`] for non-finite coordinates and
/// [`ActionError::MoveTargetOutOfBounds`] when the point is outside.
pub fn assert_target_in_viewport(target: Point, viewport: Viewport) -> Result<(), ActionError> {
    if !target.x.is_finite() {
        return Err(ActionError::invalid(format!(
            "Expected \"x\" to be finite number, got {}",
            target.x
        )));
    }
    if !target.y.is_finite() {
        return Err(ActionError::invalid(format!(
            "Expected \"y\" to be finite number, got {}",
            target.y
        )));
    }

    if target.x < 0.0
        || target.y < 0.0
        || target.x > viewport.width
        || target.y > viewport.height
    {
        return Err(ActionError::MoveTargetOutOfBounds(format!(
            "Move target ({}, {}) is out of bounds of viewport dimensions ({}, {})",
            target.x, target.y, viewport.width, viewport.height
        )));
    }

    Ok(())
}

/// Intermediate position `ratio` of the way from `start` to `target`,
/// floored component-wise.
pub fn interpolate(start: Point, target: Point, ratio: f64) -> Point {
    Point::new(
        (start.x + ratio * (target.x - start.x)).floor(),
        (start.y + ratio * (target.y - start.y)).floor(),
    )
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn viewport() -> Viewport {
        Viewport::new(800.0, 600.0)
    }

    #[test]
    fn test_target_inside_viewport_is_accepted() {
        assert!(assert_target_in_viewport(Point::new(10.0, 10.0), viewport()).is_ok());
    }

    #[test]
    fn test_viewport_edges_are_inclusive() {
        assert!(assert_target_in_viewport(Point::new(0.0, 0.0), viewport()).is_ok());
        assert!(assert_target_in_viewport(Point::new(800.0, 600.0), viewport()).is_ok());
    }

    #[test]
    fn test_negative_x_is_out_of_bounds() {
        let err = assert_target_in_viewport(Point::new(-1.0, 10.0), viewport()).unwrap_err();
        assert!(matches!(err, ActionError::MoveTargetOutOfBounds(_)));
    }

    #[test]
    fn test_y_beyond_height_is_out_of_bounds() {
        let err = assert_target_in_viewport(Point::new(10.0, 600.5), viewport()).unwrap_err();
        assert!(matches!(err, ActionError::MoveTargetOutOfBounds(_)));
    }

    #[test]
    fn test_non_finite_target_is_invalid_argument() {
        let err = assert_target_in_viewport(Point::new(f64::NAN, 1.0), viewport()).unwrap_err();
        assert!(matches!(err, ActionError::InvalidArgument(_)));
    }

    #[test]
    fn test_interpolate_floors_each_component() {
        // Arrange
        let start = Point::new(0.0, 10.0);
        let target = Point::new(10.0, 0.0);

        // Act
        let mid = interpolate(start, target, 0.55);

        // Assert – x = 5.5 → 5, y = 10 - 5.5 = 4.5 → 4
        assert_eq!(mid, Point::new(5.0, 4.0));
    }

    #[test]
    fn test_interpolate_at_ratio_one_reaches_target() {
        let p = interpolate(Point::new(3.0, 4.0), Point::new(30.0, 40.0), 1.0);
        assert_eq!(p, Point::new(30.0, 40.0));
    }

    #[test]
    fn test_in_view_centre_of_fully_visible_rect() {
        let rect = Rect::new(100.0, 100.0, 50.0, 20.0);
        assert_eq!(rect.in_view_centre(viewport()), Point::new(125.0, 110.0));
    }

    #[test]
    fn test_in_view_centre_clips_to_viewport() {
        // Rect sticks out past the right edge: visible part is 700..800.
        let rect = Rect::new(700.0, 0.0, 400.0, 100.0);
        assert_eq!(rect.in_view_centre(viewport()), Point::new(750.0, 50.0));
    }
}
