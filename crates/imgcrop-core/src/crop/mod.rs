//! Crop operations: rectangle and polygon.
//!
//! A crop takes a source image on disk and a [`CropRegion`] in the source's
//! pixel space, and writes a new PNG next to the source:
//!
//! - **Rect**: opaque RGB, exactly the rectangle's size, named
//!   `<stem>_cropped_rect.png`
//! - **Polygon**: RGBA with everything outside the even-odd union of the
//!   loops transparent, sized to the loops' bounding box, named
//!   `<stem>_cropped_poly.png`
//!
//! Each call decodes the source, allocates fresh buffers, writes the output
//! atomically and releases everything before returning. Failures never leave
//! a partial output file.
//!
//! # Example
//!
//! ```ignore
//! use imgcrop_core::{crop, CropRegion, CropRequest, Rectangle};
//!
//! let request = CropRequest::new("plans/site.png", CropRegion::Rect(Rectangle::new(2, 2, 4, 4)));
//! let output = crop(&request)?;
//! println!("wrote {}", output.path.display());
//! ```

pub mod naming;
pub mod polygon;
pub mod rect;

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use naming::output_path;
pub use polygon::{clip_polygon_pixels, crop_polygon, ClipRegion};
pub use rect::{crop_rect, crop_rect_pixels};

use crate::error::CropError;
use crate::geometry::PolygonSet;
use crate::Rectangle;

/// Which kind of crop produced an output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CropKind {
    Rect,
    Polygon,
}

impl CropKind {
    /// File name suffix for outputs of this kind.
    pub fn suffix(self) -> &'static str {
        match self {
            CropKind::Rect => "cropped_rect",
            CropKind::Polygon => "cropped_poly",
        }
    }
}

/// The region to keep, in source pixel coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum CropRegion {
    Rect(Rectangle),
    Polygon(PolygonSet),
}

impl CropRegion {
    pub fn kind(&self) -> CropKind {
        match self {
            CropRegion::Rect(_) => CropKind::Rect,
            CropRegion::Polygon(_) => CropKind::Polygon,
        }
    }
}

/// Everything a single crop needs.
#[derive(Debug, Clone, PartialEq)]
pub struct CropRequest {
    /// Source image on disk
    pub source: PathBuf,
    /// Region to keep
    pub region: CropRegion,
    /// Output resolution; falls back to the source's EXIF value, then 96
    pub dpi: Option<f64>,
}

impl CropRequest {
    pub fn new(source: impl Into<PathBuf>, region: CropRegion) -> Self {
        Self {
            source: source.into(),
            region,
            dpi: None,
        }
    }

    pub fn with_dpi(mut self, dpi: f64) -> Self {
        self.dpi = Some(dpi);
        self
    }
}

/// Result of a successful crop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropOutput {
    /// The PNG that was written
    pub path: PathBuf,
    /// Source pixel rectangle covered by the output
    pub bounds: Rectangle,
    /// Resolution stored in the output, in DPI
    pub resolution: f64,
    pub kind: CropKind,
}

/// Run a crop request, dispatching on the region kind.
pub fn crop(request: &CropRequest) -> Result<CropOutput, CropError> {
    let source: &Path = &request.source;
    log::debug!(
        "{:?} crop of {} requested",
        request.region.kind(),
        source.display()
    );

    match &request.region {
        CropRegion::Rect(rect) => crop_rect(source, *rect, request.dpi),
        CropRegion::Polygon(loops) => crop_polygon(source, loops, request.dpi),
    }
}
