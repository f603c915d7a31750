//! Runs a job: maps the model-space reference into pixel space, calls the
//! crop engine and reports what a host needs to re-place the result.

use std::path::{Path, PathBuf};

use imgcrop_core::decode::probe_dimensions;
use imgcrop_core::geometry::sanitize_loop;
use imgcrop_core::{
    crop, CoordinateMapper, CropError, CropKind, CropRegion, CropRequest, Loop, Point, RawPoint,
    Rectangle, ScaleFactors,
};
use serde::Serialize;
use thiserror::Error;

use crate::job::{raw_loops, CropJob, ImagePlacement, ReferenceRegion};

/// Errors that can occur while running a job.
#[derive(Debug, Error)]
pub enum JobError {
    /// The job file could not be read.
    #[error("Cannot read job file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// The job file is not valid JSON for a job.
    #[error("Invalid job file: {0}")]
    Parse(#[from] serde_json::Error),

    /// Pixel dimensions were not given and could not be read from the file.
    #[error("Pixel dimensions unknown for {}", .0.display())]
    MissingDimensions(PathBuf),

    /// The rectangular reference has no area.
    #[error("Crop reference has no extent ({width} x {height})")]
    DegenerateReference { width: f64, height: f64 },

    #[error(transparent)]
    Crop(#[from] CropError),
}

/// What the host gets back after a crop.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JobResult {
    /// The PNG that was written
    pub path: PathBuf,
    pub kind: CropKind,
    /// Source pixel rectangle covered by the output
    pub bounds: Rectangle,
    /// Resolution stored in the output, in DPI
    pub resolution: f64,
    /// Physical width to give the re-placed image, in model units
    pub target_width: f64,
}

/// Read and parse a job file.
pub fn load_job(path: &Path) -> Result<CropJob, JobError> {
    let text = std::fs::read_to_string(path).map_err(|source| JobError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(serde_json::from_str(&text)?)
}

/// Run one job to completion.
pub fn run_job(job: &CropJob) -> Result<JobResult, JobError> {
    let image = &job.image;
    let mapper = build_mapper(image)?;

    let (region, rect_width) = match &job.region {
        ReferenceRegion::Rect { min, max } => {
            let (min, max) = (Point::new(min[0], min[1]), Point::new(max[0], max[1]));
            let (width, height) = (max.x - min.x, max.y - min.y);
            if !(width > 0.0 && height > 0.0) {
                return Err(JobError::DegenerateReference { width, height });
            }

            let rect = mapper.map_rect(min, max);
            log::debug!("reference box maps to {:?}", rect);
            (CropRegion::Rect(rect), Some(width))
        }
        ReferenceRegion::Polygon { loops } => {
            (CropRegion::Polygon(map_loops(&mapper, &raw_loops(loops))), None)
        }
    };

    let mut request = CropRequest::new(&image.path, region);
    if let Some(dpi) = image.resolution {
        request = request.with_dpi(dpi);
    }
    let output = crop(&request)?;

    // Polygon outputs are re-placed at the width of their bounding box
    let target_width =
        rect_width.unwrap_or_else(|| mapper.to_physical_width(output.bounds.width));

    Ok(JobResult {
        path: output.path,
        kind: output.kind,
        bounds: output.bounds,
        resolution: output.resolution,
        target_width,
    })
}

/// Build the model-to-pixel mapper for a placed image.
fn build_mapper(image: &ImagePlacement) -> Result<CoordinateMapper, JobError> {
    let (pixel_width, pixel_height) = match image.declared_dimensions() {
        Some(dims) => dims,
        None => {
            if !image.path.exists() {
                return Err(CropError::SourceNotFound(image.path.clone()).into());
            }
            probe_dimensions(&image.path)
                .ok_or_else(|| JobError::MissingDimensions(image.path.clone()))?
        }
    };

    let scale = ScaleFactors::from_extents(pixel_width, pixel_height, image.width, image.height)?;
    Ok(CoordinateMapper::new(image.origin_point(), image.height, scale))
}

/// Clean each loop in model space and map it to pixels. Unusable loops are
/// left for the crop engine to reject.
fn map_loops(mapper: &CoordinateMapper, loops: &[Vec<RawPoint>]) -> Vec<Loop> {
    loops
        .iter()
        .map(|raw| mapper.map_loop(&sanitize_loop(raw)))
        .collect()
}
