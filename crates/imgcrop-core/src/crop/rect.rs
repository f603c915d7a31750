//! Rectangular cropping.
//!
//! The crop region is an integer [`Rectangle`] in source pixel space. The
//! output is an opaque RGB raster of exactly the rectangle's size.
//!
//! # Coordinate System
//!
//! - (0, 0) = top-left pixel of the source
//! - The rectangle may extend past the source bounds; those pixels are black
//! - Width and height are at least 1 (enforced by `Rectangle`)

use std::path::Path;

use image::RgbImage;

use super::{naming, CropKind, CropOutput};
use crate::decode::{load_source, resolve_dpi};
use crate::encode::{encode_png, write_atomic, PixelLayout};
use crate::error::CropError;
use crate::Rectangle;

/// Copy the pixels under `rect` into a new image of the rectangle's size.
///
/// # Behavior
///
/// - Output dimensions always equal `rect.width` x `rect.height`
/// - Pixels outside the source image are black
/// - Output pixel (0, 0) is source pixel (`rect.x`, `rect.y`)
///
/// # Errors
///
/// Returns `CropError::Allocation` if the output buffer size overflows or
/// cannot be reserved.
pub fn crop_rect_pixels(image: &RgbImage, rect: Rectangle) -> Result<RgbImage, CropError> {
    let (src_w, src_h) = image.dimensions();
    let out_width = rect.width;
    let out_height = rect.height;

    let mut output = zeroed_buffer(out_width, out_height)?;

    // Horizontal overlap with the source, in source coordinates
    let left = (rect.x as i64).max(0);
    let right = rect.right().min(src_w as i64);
    if left >= right {
        return to_image(out_width, out_height, output);
    }
    let span = ((right - left) * 3) as usize;
    let dst_offset = ((left - rect.x as i64) * 3) as usize;

    let src = image.as_raw();
    let src_stride = src_w as usize * 3;
    let dst_stride = out_width as usize * 3;

    // Copy pixel data row by row
    for y in 0..out_height {
        let src_y = rect.y as i64 + y as i64;
        if src_y < 0 || src_y >= src_h as i64 {
            continue;
        }

        let src_start = src_y as usize * src_stride + left as usize * 3;
        let dst_start = y as usize * dst_stride + dst_offset;
        output[dst_start..dst_start + span].copy_from_slice(&src[src_start..src_start + span]);
    }

    to_image(out_width, out_height, output)
}

/// A black RGB buffer for `width` x `height` pixels.
fn zeroed_buffer(width: u32, height: u32) -> Result<Vec<u8>, CropError> {
    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(3))
        .ok_or(CropError::Allocation { width, height })?;

    let mut buffer = Vec::new();
    buffer
        .try_reserve_exact(len)
        .map_err(|_| CropError::Allocation { width, height })?;
    buffer.resize(len, 0);
    Ok(buffer)
}

fn to_image(width: u32, height: u32, pixels: Vec<u8>) -> Result<RgbImage, CropError> {
    RgbImage::from_raw(width, height, pixels).ok_or(CropError::Allocation { width, height })
}

/// Crop the source image at `source` to `rect` and write it next to the
/// source as `<stem>_cropped_rect.png`.
///
/// # Errors
///
/// Returns `CropError::SourceNotFound` if `source` does not exist,
/// `CropError::Allocation` if the rectangle is too large to hold in memory,
/// and decode, encode or I/O errors otherwise. Nothing is written on failure.
pub fn crop_rect(source: &Path, rect: Rectangle, dpi: Option<f64>) -> Result<CropOutput, CropError> {
    let src = load_source(source)?;
    let cropped = crop_rect_pixels(&src.image.to_rgb8(), rect)?;

    let resolution = resolve_dpi(dpi, src.resolution);
    let bytes = encode_png(
        cropped.as_raw(),
        cropped.width(),
        cropped.height(),
        PixelLayout::Rgb,
        resolution,
    )?;

    let path = naming::output_path(source, CropKind::Rect.suffix());
    write_atomic(&path, &bytes)?;

    log::info!(
        "rect crop {}x{} at ({}, {}) written to {}",
        rect.width,
        rect.height,
        rect.x,
        rect.y,
        path.display()
    );

    Ok(CropOutput {
        path,
        bounds: rect,
        resolution,
        kind: CropKind::Rect,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            let v = ((y * width + x) % 256) as u8;
            Rgb([v, v.wrapping_add(1), v.wrapping_add(2)])
        })
    }

    #[test]
    fn test_center_crop() {
        let img = test_image(10, 10);
        let result = crop_rect_pixels(&img, Rectangle::new(2, 2, 4, 4)).unwrap();

        assert_eq!(result.dimensions(), (4, 4));
        // First pixel should be from position (2, 2) in the source
        assert_eq!(result.get_pixel(0, 0), img.get_pixel(2, 2));
        assert_eq!(result.get_pixel(3, 3), img.get_pixel(5, 5));
    }

    #[test]
    fn test_full_crop() {
        let img = test_image(20, 15);
        let result = crop_rect_pixels(&img, Rectangle::new(0, 0, 20, 15)).unwrap();
        assert_eq!(result.as_raw(), img.as_raw());
    }

    #[test]
    fn test_zero_size_clamps_to_one_pixel() {
        let img = test_image(10, 10);
        let result = crop_rect_pixels(&img, Rectangle::new(3, 4, 0, 0)).unwrap();

        assert_eq!(result.dimensions(), (1, 1));
        assert_eq!(result.get_pixel(0, 0), img.get_pixel(3, 4));
    }

    #[test]
    fn test_negative_size_clamps_to_one_pixel() {
        let img = test_image(10, 10);
        let result = crop_rect_pixels(&img, Rectangle::new(1, 1, -5, -7)).unwrap();
        assert_eq!(result.dimensions(), (1, 1));
    }

    #[test]
    fn test_out_of_bounds_pixels_are_black() {
        let img = RgbImage::from_pixel(4, 4, Rgb([200, 100, 50]));
        let result = crop_rect_pixels(&img, Rectangle::new(-2, -1, 4, 3)).unwrap();

        assert_eq!(result.dimensions(), (4, 3));
        assert_eq!(result.get_pixel(0, 0), &Rgb([0, 0, 0]));
        assert_eq!(result.get_pixel(1, 1), &Rgb([0, 0, 0]));
        assert_eq!(result.get_pixel(2, 0), &Rgb([0, 0, 0]));
        assert_eq!(result.get_pixel(2, 1), &Rgb([200, 100, 50]));
        assert_eq!(result.get_pixel(3, 2), &Rgb([200, 100, 50]));
    }

    #[test]
    fn test_entirely_outside_source() {
        let img = test_image(5, 5);
        let result = crop_rect_pixels(&img, Rectangle::new(50, 50, 3, 2)).unwrap();

        assert_eq!(result.dimensions(), (3, 2));
        assert!(result.as_raw().iter().all(|&v| v == 0));
    }

    #[test]
    fn test_extends_past_right_edge() {
        let img = test_image(6, 6);
        let result = crop_rect_pixels(&img, Rectangle::new(4, 0, 4, 1)).unwrap();

        assert_eq!(result.get_pixel(0, 0), img.get_pixel(4, 0));
        assert_eq!(result.get_pixel(1, 0), img.get_pixel(5, 0));
        assert_eq!(result.get_pixel(2, 0), &Rgb([0, 0, 0]));
    }

    #[test]
    fn test_oversized_rect_is_an_allocation_error() {
        let img = RgbImage::new(4, 4);
        let huge = Rectangle::new(0, 0, u32::MAX as i64, u32::MAX as i64);

        assert!(matches!(
            crop_rect_pixels(&img, huge),
            Err(CropError::Allocation { width, height }) if width == u32::MAX && height == u32::MAX
        ));
    }

    #[test]
    fn test_unreservable_rect_is_an_allocation_error() {
        let img = RgbImage::new(4, 4);
        // Fits in usize but exceeds the largest possible allocation
        let huge = Rectangle::new(0, 0, 1 << 31, 1 << 31);

        assert!(matches!(
            crop_rect_pixels(&img, huge),
            Err(CropError::Allocation { .. })
        ));
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
