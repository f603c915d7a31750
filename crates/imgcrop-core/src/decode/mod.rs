//! Source image loading for imgcrop.
//!
//! This module provides functionality for:
//! - Decoding the source raster (PNG or JPEG) from a path on disk
//! - Probing pixel dimensions without a full decode
//! - Probing the source resolution from EXIF metadata
//! - Resolving the resolution written to outputs
//!
//! All operations are synchronous. Decoded buffers are owned by the caller
//! and released when dropped.

mod resolution;
mod source;

pub use resolution::{probe_resolution, resolve_dpi};
pub use source::{load_source, probe_dimensions, SourceImage};
