//! Source raster decoding.

use std::io::Cursor;
use std::path::Path;

use image::{DynamicImage, ImageReader};

use super::probe_resolution;
use crate::error::CropError;

/// A decoded source image plus the resolution found in its metadata.
#[derive(Debug, Clone)]
pub struct SourceImage {
    pub image: DynamicImage,
    /// Resolution in DPI from EXIF, if the file carries one.
    pub resolution: Option<f64>,
}

impl SourceImage {
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }
}

/// Load and decode the source image at `path`.
///
/// # Errors
///
/// Returns `CropError::SourceNotFound` if `path` does not exist.
/// Returns `CropError::Decode` if the file is not a readable image.
pub fn load_source(path: &Path) -> Result<SourceImage, CropError> {
    if !path.exists() {
        return Err(CropError::SourceNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    let resolution = probe_resolution(&bytes);

    let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
        .with_guessed_format()
        .map_err(|e| CropError::Decode(e.to_string()))?;

    let image = reader
        .decode()
        .map_err(|e| CropError::Decode(e.to_string()))?;
    let source = SourceImage { image, resolution };

    log::debug!(
        "loaded source {} ({}x{}, resolution {:?})",
        path.display(),
        source.width(),
        source.height(),
        source.resolution
    );

    Ok(source)
}

/// Read the pixel dimensions of an image file from its header.
///
/// Returns `None` if the file is missing or not a recognised image.
pub fn probe_dimensions(path: &Path) -> Option<(u32, u32)> {
    match image::image_dimensions(path) {
        Ok(dims) => Some(dims),
        Err(e) => {
            log::debug!("could not probe dimensions of {}: {}", path.display(), e);
            None
        }
    }
}
