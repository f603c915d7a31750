//! imgcrop Core - Image cropping engine
//!
//! This crate provides the core cropping functionality for imgcrop:
//! rectangular crops into opaque PNGs and even-odd polygon crops into
//! alpha-transparent PNGs, together with the geometry helpers that feed them
//! (sanitizing loops, signed area, bounding boxes, model-to-pixel mapping).

pub mod crop;
pub mod decode;
pub mod encode;
pub mod error;
pub mod geometry;

pub use crop::{crop, crop_polygon, crop_rect, CropKind, CropOutput, CropRegion, CropRequest};
pub use error::CropError;
pub use geometry::{CoordinateMapper, Loop, PolygonSet, RawPoint, ScaleFactors};

/// Resolution written to outputs when none is supplied or probed.
pub const DEFAULT_DPI: f64 = 96.0;

/// Smallest number of points a loop needs to enclose an area.
pub const MIN_POLYGON_POINTS: usize = 3;

/// Loops with a smaller absolute signed area are treated as degenerate.
pub const MIN_AREA_THRESHOLD: f64 = 1e-6;

/// Output rasters are never smaller than this in either dimension.
pub const MIN_DIMENSION: u32 = 1;

/// A 2D point. Whether it lives in model or pixel space depends on context.
#[derive(Debug, Clone, Copy, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both coordinates are neither NaN nor infinite.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Return this point shifted by `(dx, dy)`.
    pub fn translated(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Integer pixel rectangle with a strictly positive size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rectangle {
    /// Left edge in pixels (may be negative)
    pub x: i32,
    /// Top edge in pixels (may be negative)
    pub y: i32,
    /// Width in pixels (at least 1)
    pub width: u32,
    /// Height in pixels (at least 1)
    pub height: u32,
}

impl Rectangle {
    /// Create a rectangle, clamping zero or negative sizes up to 1.
    pub fn new(x: i32, y: i32, width: i64, height: i64) -> Self {
        Self {
            x,
            y,
            width: clamp_dimension(width),
            height: clamp_dimension(height),
        }
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i64 {
        self.x as i64 + self.width as i64
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i64 {
        self.y as i64 + self.height as i64
    }
}

fn clamp_dimension(value: i64) -> u32 {
    value.clamp(MIN_DIMENSION as i64, u32::MAX as i64) as u32
}
