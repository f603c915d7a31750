//! Model-space to pixel-space conversion.
//!
//! Authoring geometry is in physical units with Y pointing up, while raster
//! rows are stored top to bottom. The mapper measures points from the
//! image's model-space origin (its lower-left corner), scales each axis
//! independently and flips Y against the image's physical height:
//!
//! ```text
//! x_px = (x_model - origin_x) * scale_x
//! y_px = (height_model - (y_model - origin_y)) * scale_y
//! ```

use crate::error::CropError;
use crate::{Point, Rectangle};

/// Pixels per physical unit along each axis. Always strictly positive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactors {
    x: f64,
    y: f64,
}

impl ScaleFactors {
    /// Create scale factors, rejecting non-positive or non-finite values.
    pub fn new(x: f64, y: f64) -> Result<Self, CropError> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(x) || !valid(y) {
            return Err(CropError::InvalidMapping {
                scale_x: x,
                scale_y: y,
            });
        }
        Ok(Self { x, y })
    }

    /// Derive scale factors from an image's pixel size and physical size.
    pub fn from_extents(
        pixel_width: u32,
        pixel_height: u32,
        physical_width: f64,
        physical_height: f64,
    ) -> Result<Self, CropError> {
        let ratio = |px: u32, physical: f64| {
            if physical != 0.0 {
                px as f64 / physical
            } else {
                0.0
            }
        };
        Self::new(
            ratio(pixel_width, physical_width),
            ratio(pixel_height, physical_height),
        )
    }

    #[inline]
    pub fn x(&self) -> f64 {
        self.x
    }

    #[inline]
    pub fn y(&self) -> f64 {
        self.y
    }
}

/// Converts points from an image placement's model space into its pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CoordinateMapper {
    /// Model-space lower-left corner of the placed image
    pub origin: Point,
    /// Physical height of the placed image
    pub height: f64,
    /// Pixels per physical unit
    pub scale: ScaleFactors,
}

impl CoordinateMapper {
    pub fn new(origin: Point, height: f64, scale: ScaleFactors) -> Self {
        Self {
            origin,
            height,
            scale,
        }
    }

    /// Map one model-space point to pixel space.
    #[inline]
    pub fn to_pixel(&self, p: Point) -> Point {
        let dx = p.x - self.origin.x;
        let dy = p.y - self.origin.y;
        Point::new(dx * self.scale.x, (self.height - dy) * self.scale.y)
    }

    /// Map every point of a loop.
    pub fn map_loop(&self, points: &[Point]) -> Vec<Point> {
        points.iter().map(|&p| self.to_pixel(p)).collect()
    }

    /// Map a model-space box (`min` lower-left, `max` upper-right) to a pixel
    /// rectangle anchored at its upper-left corner.
    ///
    /// Position and size are each rounded to the nearest pixel.
    pub fn map_rect(&self, min: Point, max: Point) -> Rectangle {
        let upper_left = self.to_pixel(Point::new(min.x, max.y));
        let width = (max.x - min.x) * self.scale.x;
        let height = (max.y - min.y) * self.scale.y;

        Rectangle::new(
            upper_left.x.round() as i32,
            upper_left.y.round() as i32,
            width.round() as i64,
            height.round() as i64,
        )
    }

    /// Convert a pixel width back to physical units.
    #[inline]
    pub fn to_physical_width(&self, pixels: u32) -> f64 {
        pixels as f64 / self.scale.x
    }
}
