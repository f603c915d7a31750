//! Job file format.
//!
//! A job describes one placed image and one crop reference, both in model
//! space:
//!
//! ```json
//! {
//!   "image": {
//!     "path": "plans/site.png",
//!     "pixel_width": 2400,
//!     "pixel_height": 1800,
//!     "width": 2.0,
//!     "height": 1.5,
//!     "origin": [10.0, 20.0],
//!     "resolution": 150
//!   },
//!   "region": { "kind": "rect", "min": [10.5, 20.25], "max": [11.0, 20.75] }
//! }
//! ```
//!
//! Polygon references list their boundary loops instead; coordinates may be
//! `null` where the host could not evaluate a point:
//!
//! ```json
//! "region": { "kind": "polygon", "loops": [[[0, 0], [1, 0], [null, 0.5], [1, 1]]] }
//! ```

use std::path::PathBuf;

use imgcrop_core::{Point, RawPoint};
use serde::Deserialize;

/// A complete crop job.
#[derive(Debug, Clone, Deserialize)]
pub struct CropJob {
    pub image: ImagePlacement,
    pub region: ReferenceRegion,
}

/// A raster image placed in model space.
#[derive(Debug, Clone, Deserialize)]
pub struct ImagePlacement {
    /// Source file on disk
    pub path: PathBuf,
    /// Pixel width; probed from the file when missing or zero
    pub pixel_width: Option<u32>,
    /// Pixel height; probed from the file when missing or zero
    pub pixel_height: Option<u32>,
    /// Physical width in model units
    pub width: f64,
    /// Physical height in model units
    pub height: f64,
    /// Model-space lower-left corner
    pub origin: [f64; 2],
    /// Output resolution in DPI
    pub resolution: Option<f64>,
}

impl ImagePlacement {
    pub fn origin_point(&self) -> Point {
        Point::new(self.origin[0], self.origin[1])
    }

    /// Pixel dimensions if both are given and non-zero.
    pub fn declared_dimensions(&self) -> Option<(u32, u32)> {
        match (self.pixel_width, self.pixel_height) {
            (Some(w), Some(h)) if w > 0 && h > 0 => Some((w, h)),
            _ => None,
        }
    }
}

/// The crop reference drawn over the image.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ReferenceRegion {
    /// Axis-aligned box given by its lower-left and upper-right corners.
    Rect { min: [f64; 2], max: [f64; 2] },
    /// Boundary loops, possibly with missing coordinates.
    Polygon { loops: Vec<Vec<[Option<f64>; 2]>> },
}

/// Convert job loops into raw points for sanitizing.
pub fn raw_loops(loops: &[Vec<[Option<f64>; 2]>]) -> Vec<Vec<RawPoint>> {
    loops
        .iter()
        .map(|l| l.iter().map(|&[x, y]| RawPoint::new(x, y)).collect())
        .collect()
}
