//! Output resolution lookup.
//!
//! The resolution written into outputs comes from, in order: an explicit
//! value supplied by the caller, the source's EXIF `XResolution`, and
//! finally [`DEFAULT_DPI`]. Invalid values at any step are skipped.

use std::io::Cursor;

use exif::{In, Reader, Tag, Value};

use crate::DEFAULT_DPI;

const CM_PER_INCH: f64 = 2.54;

/// Extract the horizontal resolution in DPI from EXIF metadata.
///
/// Returns `None` if no EXIF data is found or the value is unusable.
pub fn probe_resolution(bytes: &[u8]) -> Option<f64> {
    let mut cursor = Cursor::new(bytes);
    let exif = Reader::new().read_from_container(&mut cursor).ok()?;

    let field = exif.get_field(Tag::XResolution, In::PRIMARY)?;
    let resolution = match &field.value {
        Value::Rational(values) => values.first()?.to_f64(),
        other => other.get_uint(0)? as f64,
    };

    // ResolutionUnit: 2 = inches (default), 3 = centimetres
    let per_cm = exif
        .get_field(Tag::ResolutionUnit, In::PRIMARY)
        .and_then(|f| f.value.get_uint(0))
        == Some(3);

    let dpi = if per_cm {
        resolution * CM_PER_INCH
    } else {
        resolution
    };
    valid_dpi(dpi)
}

/// Pick the resolution for an output image.
pub fn resolve_dpi(explicit: Option<f64>, probed: Option<f64>) -> f64 {
    explicit
        .and_then(valid_dpi)
        .or_else(|| probed.and_then(valid_dpi))
        .unwrap_or(DEFAULT_DPI)
}

fn valid_dpi(value: f64) -> Option<f64> {
    (value.is_finite() && value > 0.0).then_some(value)
}
