//! Integer bounding box over a set of loops.

use crate::error::CropError;
use crate::{Point, Rectangle};

/// Compute the smallest integer-aligned rectangle covering every point of
/// every loop.
///
/// Minimums are floored and maximums ceiled, and the size is clamped to at
/// least 1x1. Non-finite points are ignored, so unsanitized loops are
/// accepted.
///
/// # Errors
///
/// Returns `CropError::EmptyInput` if there are no finite points at all and
/// `CropError::OutOfRange` if the box does not fit in `i32` pixel
/// coordinates.
pub fn bounding_box<L>(loops: &[L]) -> Result<Rectangle, CropError>
where
    L: AsRef<[Point]>,
{
    let mut points = loops
        .iter()
        .flat_map(|l| l.as_ref().iter())
        .filter(|p| p.is_finite());

    let first = points.next().ok_or(CropError::EmptyInput)?;
    let (mut min_x, mut min_y, mut max_x, mut max_y) = (first.x, first.y, first.x, first.y);

    for p in points {
        min_x = min_x.min(p.x);
        min_y = min_y.min(p.y);
        max_x = max_x.max(p.x);
        max_y = max_y.max(p.y);
    }

    let out_of_range = || CropError::OutOfRange {
        min_x,
        min_y,
        max_x,
        max_y,
    };
    let left = pixel_coord(min_x.floor()).ok_or_else(out_of_range)?;
    let top = pixel_coord(min_y.floor()).ok_or_else(out_of_range)?;
    let right = pixel_coord(max_x.ceil()).ok_or_else(out_of_range)?;
    let bottom = pixel_coord(max_y.ceil()).ok_or_else(out_of_range)?;

    Ok(Rectangle::new(
        left,
        top,
        right as i64 - left as i64,
        bottom as i64 - top as i64,
    ))
}

/// An integral coordinate as `i32`, excluding `i32::MIN` so it can always be
/// negated.
fn pixel_coord(value: f64) -> Option<i32> {
    let limit = i32::MAX as f64;
    (-limit..=limit).contains(&value).then_some(value as i32)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
