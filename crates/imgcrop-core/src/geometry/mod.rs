//! Polygon geometry used to describe crop regions.
//!
//! ## Pipeline
//!
//! Raw boundary points go through these steps before they reach the clipper:
//!
//! 1. **Mapping**: model-space points become pixel-space points
//!    ([`CoordinateMapper`]), with the Y axis flipped
//! 2. **Sanitizing**: missing, non-finite and repeated points are removed
//!    ([`sanitize_loop`])
//! 3. **Degeneracy filtering**: loops under 3 points or with near-zero
//!    signed area are dropped ([`is_degenerate`])
//! 4. **Bounds**: the integer bounding box of what survives sizes the output
//!    ([`bounding_box`])
//!
//! ## Coordinate System
//!
//! - Model space: physical units, Y increases upward
//! - Pixel space: raster units, origin top-left, Y increases downward

pub mod area;
pub mod bounds;
pub mod mapping;
pub mod sanitize;

pub use area::{is_degenerate, signed_area, Winding};
pub use bounds::bounding_box;
pub use mapping::{CoordinateMapper, ScaleFactors};
pub use sanitize::sanitize_loop;

use crate::Point;

/// An open polygon boundary (no repeated closing point).
pub type Loop = Vec<Point>;

/// Loops combined with even-odd fill, so inner loops can cut holes.
pub type PolygonSet = Vec<Loop>;

/// A point as it arrives from a host, with possibly missing coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RawPoint {
    pub x: Option<f64>,
    pub y: Option<f64>,
}

impl RawPoint {
    pub fn new(x: Option<f64>, y: Option<f64>) -> Self {
        Self { x, y }
    }

    /// Returns the point if both coordinates are present and finite.
    pub fn to_point(self) -> Option<Point> {
        match (self.x, self.y) {
            (Some(x), Some(y)) if x.is_finite() && y.is_finite() => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

impl From<Point> for RawPoint {
    fn from(p: Point) -> Self {
        Self::new(Some(p.x), Some(p.y))
    }
}

impl From<(f64, f64)> for RawPoint {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(Some(x), Some(y))
    }
}

impl From<(Option<f64>, Option<f64>)> for RawPoint {
    fn from((x, y): (Option<f64>, Option<f64>)) -> Self {
        Self::new(x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_point_complete() {
        let raw = RawPoint::from((1.0, 2.0));
        assert_eq!(raw.to_point(), Some(Point::new(1.0, 2.0)));
    }

    #[test]
    fn test_raw_point_missing_component() {
        assert_eq!(RawPoint::new(None, Some(1.0)).to_point(), None);
        assert_eq!(RawPoint::new(Some(1.0), None).to_point(), None);
    }

    #[test]
    fn test_raw_point_non_finite() {
        assert_eq!(RawPoint::from((f64::NAN, 0.0)).to_point(), None);
        assert_eq!(RawPoint::from((0.0, f64::NEG_INFINITY)).to_point(), None);
    }
}
