//! Geometric primitives for diagram drawing.
//!
//! Sylva uses a coordinate system consistent with SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Levels grow downward, so the root row has the smallest y coordinate.

/// A 2D point in diagram coordinate space.
///
/// # Examples
///
/// ```
/// # use sylva_core::geometry::Point;
/// let p = Point::new(10.2, 20.0);
/// let snapped = p.ceil();
/// assert_eq!(snapped.x(), 11.0);
/// assert_eq!(snapped.y(), 20.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f32,
    y: f32,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f32 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f32 {
        self.y
    }

    /// Rounds both coordinates up to whole pixels.
    ///
    /// Every coordinate written to markup goes through this, once.
    pub fn ceil(self) -> Self {
        Self {
            x: self.x.ceil(),
            y: self.y.ceil(),
        }
    }
}

#[cfg(test)]
mod tests {
    use float_cmp::assert_approx_eq;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_point_accessors() {
        let p = Point::new(3.5, -2.0);
        assert_approx_eq!(f32, p.x(), 3.5);
        assert_approx_eq!(f32, p.y(), -2.0);
    }

    #[test]
    fn test_point_ceil_whole_values_unchanged() {
        let p = Point::new(12.0, 40.0).ceil();
        assert_approx_eq!(f32, p.x(), 12.0);
        assert_approx_eq!(f32, p.y(), 40.0);
    }

    proptest! {
        #[test]
        fn ceil_is_idempotent_and_never_rounds_down(x in -1000.0f32..1000.0, y in -1000.0f32..1000.0) {
            let once = Point::new(x, y).ceil();
            prop_assert!(once.x() >= x && once.y() >= y);
            prop_assert_eq!(once, once.ceil());
        }
    }
}
