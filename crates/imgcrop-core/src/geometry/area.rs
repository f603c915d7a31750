//! Signed polygon area and winding.

use crate::{Point, MIN_AREA_THRESHOLD, MIN_POLYGON_POINTS};

/// Winding direction of a loop in a right-handed XY frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Winding {
    CounterClockwise,
    Clockwise,
    /// Too few points or too little area to have a direction.
    Degenerate,
}

impl Winding {
    /// Classify a loop by the sign of its area.
    pub fn of(points: &[Point]) -> Self {
        if is_degenerate(points) {
            return Winding::Degenerate;
        }
        if signed_area(points) > 0.0 {
            Winding::CounterClockwise
        } else {
            Winding::Clockwise
        }
    }
}

/// Signed area of a loop using the shoelace formula.
///
/// Positive for counter-clockwise loops, negative for clockwise ones.
/// Loops with fewer than 3 points have zero area.
///
/// Formula: `0.5 * Σ (x_i * y_{i+1} - x_{i+1} * y_i)`, wrapping the last
/// point back to the first.
pub fn signed_area(points: &[Point]) -> f64 {
    if points.len() < MIN_POLYGON_POINTS {
        return 0.0;
    }

    let next = points.iter().cycle().skip(1);
    let sum: f64 = points
        .iter()
        .zip(next)
        .map(|(a, b)| a.x * b.y - b.x * a.y)
        .sum();

    0.5 * sum
}

/// A loop is degenerate if it has fewer than 3 points or its absolute
/// signed area is below [`MIN_AREA_THRESHOLD`].
#[inline]
pub fn is_degenerate(points: &[Point]) -> bool {
    points.len() < MIN_POLYGON_POINTS || signed_area(points).abs() < MIN_AREA_THRESHOLD
}
