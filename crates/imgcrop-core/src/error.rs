//! Error type shared by every crop operation.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while cropping an image.
#[derive(Debug, Error)]
pub enum CropError {
    /// The source image does not exist on disk.
    #[error("Image source path not found: {}", .0.display())]
    SourceNotFound(PathBuf),

    /// No polygon loops were supplied at all.
    #[error("Polygon loops are empty")]
    EmptyInput,

    /// Every supplied loop was discarded as too short or degenerate.
    #[error("No valid polygon loops to clip")]
    NoValidGeometry,

    /// Scale factors must be strictly positive.
    #[error("Invalid coordinate mapping: scale factors ({scale_x}, {scale_y}) must be positive")]
    InvalidMapping { scale_x: f64, scale_y: f64 },

    /// The geometry lies outside the addressable pixel range.
    #[error("Polygon bounds ({min_x}, {min_y})-({max_x}, {max_y}) exceed the pixel coordinate range")]
    OutOfRange {
        min_x: f64,
        min_y: f64,
        max_x: f64,
        max_y: f64,
    },

    /// The source file exists but could not be decoded.
    #[error("Failed to decode source image: {0}")]
    Decode(String),

    /// A drawing surface or clip mask of this size could not be created.
    #[error("Cannot allocate a {width}x{height} raster")]
    Allocation { width: u32, height: u32 },

    /// The output raster could not be encoded.
    #[error("PNG encoding failed: {0}")]
    Encode(String),

    /// I/O error while reading the source or writing the output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CropError {
    /// True for failures caused by the supplied geometry rather than by files.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            CropError::EmptyInput
                | CropError::NoValidGeometry
                | CropError::InvalidMapping { .. }
                | CropError::OutOfRange { .. }
        )
    }
}
