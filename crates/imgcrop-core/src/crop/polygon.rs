//! Polygon cropping with transparency.
//!
//! The crop region is a set of loops in source pixel space, combined with
//! the even-odd fill rule: a pixel is kept when an odd number of loops
//! enclose it. Nested loops therefore cut holes, and two overlapping loops
//! cancel where they overlap, whatever their winding.
//!
//! # Algorithm
//!
//! 1. Sanitize every loop and drop those that are too short or degenerate
//! 2. Size the output to the integer bounding box of the surviving loops
//! 3. Translate the loops into output-local coordinates
//! 4. Rasterize them into a binary even-odd clip mask
//! 5. Draw the source onto a transparent surface, offset by the bounding
//!    box origin, through the mask
//!
//! The surfaces and the mask are `tiny_skia` values owned by this module
//! and dropped on every return path.

use std::path::Path;

use image::RgbaImage;
use tiny_skia::{
    ColorU8, FillRule, Mask, Path as SkiaPath, PathBuilder, Pixmap, PixmapPaint, Transform,
};

use super::{naming, CropKind, CropOutput};
use crate::decode::{load_source, resolve_dpi};
use crate::encode::{encode_png, write_atomic, PixelLayout};
use crate::error::CropError;
use crate::geometry::{bounding_box, is_degenerate, sanitize_loop, Loop};
use crate::{Rectangle, MIN_POLYGON_POINTS};

/// Loops ready for clipping: sanitized, non-degenerate and translated so
/// that `bounds` starts at (0, 0).
#[derive(Debug, Clone, PartialEq)]
pub struct ClipRegion {
    /// Loops in output-local pixel coordinates
    pub loops: Vec<Loop>,
    /// Bounding box of the loops in source pixel coordinates
    pub bounds: Rectangle,
}

impl ClipRegion {
    /// Clean and validate `loops`, then move them into output-local space.
    ///
    /// # Errors
    ///
    /// Returns `CropError::EmptyInput` if `loops` is empty,
    /// `CropError::NoValidGeometry` if every loop was discarded and
    /// `CropError::OutOfRange` if the loops lie beyond `i32` pixel space.
    pub fn new(loops: &[Loop]) -> Result<Self, CropError> {
        if loops.is_empty() {
            return Err(CropError::EmptyInput);
        }

        let valid: Vec<Loop> = loops
            .iter()
            .map(|l| sanitize_loop(l))
            .filter(|l| l.len() >= MIN_POLYGON_POINTS && !is_degenerate(l))
            .collect();

        let discarded = loops.len() - valid.len();
        if discarded > 0 {
            log::warn!(
                "discarded {} of {} polygon loops as degenerate",
                discarded,
                loops.len()
            );
        }
        if valid.is_empty() {
            return Err(CropError::NoValidGeometry);
        }

        let bounds = bounding_box(&valid)?;
        let (dx, dy) = (-(bounds.x as f64), -(bounds.y as f64));
        let loops = valid
            .into_iter()
            .map(|l| l.into_iter().map(|p| p.translated(dx, dy)).collect())
            .collect();

        log::debug!(
            "clip region bounds ({}, {}) {}x{}",
            bounds.x,
            bounds.y,
            bounds.width,
            bounds.height
        );

        Ok(Self { loops, bounds })
    }

    /// Combine all loops into one closed path.
    fn to_path(&self) -> Option<SkiaPath> {
        let mut pb = PathBuilder::new();
        for l in &self.loops {
            let (first, rest) = l.split_first()?;
            pb.move_to(first.x as f32, first.y as f32);
            for p in rest {
                pb.line_to(p.x as f32, p.y as f32);
            }
            pb.close();
        }
        pb.finish()
    }

    /// Rasterize the loops into a binary even-odd mask the size of `bounds`.
    fn to_mask(&self) -> Result<Mask, CropError> {
        let (width, height) = (self.bounds.width, self.bounds.height);
        let mut mask = Mask::new(width, height).ok_or(CropError::Allocation { width, height })?;
        let path = self.to_path().ok_or(CropError::NoValidGeometry)?;

        // No anti-aliasing: every pixel is either fully kept or fully cleared
        mask.fill_path(&path, FillRule::EvenOdd, false, Transform::identity());
        Ok(mask)
    }
}

/// Clip `image` to `region`, producing a transparent-background image the
/// size of the region's bounding box.
pub fn clip_polygon_pixels(image: &RgbaImage, region: &ClipRegion) -> Result<RgbaImage, CropError> {
    let source = pixmap_from_rgba(image)?;
    let mask = region.to_mask()?;

    let (width, height) = (region.bounds.width, region.bounds.height);
    let mut canvas = Pixmap::new(width, height).ok_or(CropError::Allocation { width, height })?;

    canvas.draw_pixmap(
        -region.bounds.x,
        -region.bounds.y,
        source.as_ref(),
        &PixmapPaint::default(),
        Transform::identity(),
        Some(&mask),
    );

    rgba_from_pixmap(&canvas)
}

/// Convert straight-alpha RGBA into a premultiplied pixmap.
fn pixmap_from_rgba(image: &RgbaImage) -> Result<Pixmap, CropError> {
    let (width, height) = image.dimensions();
    let mut pixmap = Pixmap::new(width, height).ok_or(CropError::Allocation { width, height })?;

    for (dst, src) in pixmap.pixels_mut().iter_mut().zip(image.pixels()) {
        let [r, g, b, a] = src.0;
        *dst = ColorU8::from_rgba(r, g, b, a).premultiply();
    }

    Ok(pixmap)
}

/// Convert a premultiplied pixmap back into straight-alpha RGBA.
fn rgba_from_pixmap(pixmap: &Pixmap) -> Result<RgbaImage, CropError> {
    let (width, height) = (pixmap.width(), pixmap.height());
    let data: Vec<u8> = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    RgbaImage::from_raw(width, height, data).ok_or(CropError::Allocation { width, height })
}

/// Crop the source image at `source` to the even-odd union of `loops` and
/// write it next to the source as `<stem>_cropped_poly.png`.
///
/// Loops are in source pixel coordinates. The returned bounds are the pixel
/// rectangle the output covers in the source.
///
/// # Errors
///
/// Returns `CropError::SourceNotFound` if `source` does not exist,
/// `CropError::EmptyInput` / `CropError::NoValidGeometry` for unusable
/// loops, and decode, encode or I/O errors otherwise. Nothing is written on
/// failure.
pub fn crop_polygon(source: &Path, loops: &[Loop], dpi: Option<f64>) -> Result<CropOutput, CropError> {
    if !source.exists() {
        return Err(CropError::SourceNotFound(source.to_path_buf()));
    }

    let region = ClipRegion::new(loops)?;
    let src = load_source(source)?;
    let clipped = clip_polygon_pixels(&src.image.to_rgba8(), &region)?;

    let resolution = resolve_dpi(dpi, src.resolution);
    let bytes = encode_png(
        clipped.as_raw(),
        clipped.width(),
        clipped.height(),
        PixelLayout::Rgba,
        resolution,
    )?;

    let path = naming::output_path(source, CropKind::Polygon.suffix());
    write_atomic(&path, &bytes)?;

    log::info!(
        "polygon crop of {} loops ({}x{}) written to {}",
        region.loops.len(),
        region.bounds.width,
        region.bounds.height,
        path.display()
    );

    Ok(CropOutput {
        path,
        bounds: region.bounds,
        resolution,
        kind: CropKind::Polygon,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Point;
    use image::Rgba;

    fn lp(coords: &[(f64, f64)]) -> Loop {
        coords.iter().map(|&c| Point::from(c)).collect()
    }

    fn square(min: f64, max: f64) -> Loop {
        lp(&[(min, min), (max, min), (max, max), (min, max)])
    }

    /// Opaque image with a unique color per pixel.
    fn test_image(width: u32, height: u32) -> RgbaImage {
        RgbaImage::from_fn(width, height, |x, y| Rgba([(x * 10 % 256) as u8, (y * 10 % 256) as u8, 77, 255]))
    }

    #[test]
    fn test_empty_set() {
        assert!(matches!(ClipRegion::new(&[]), Err(CropError::EmptyInput)));
    }

    #[test]
    fn test_all_degenerate() {
        let loops = vec![
            lp(&[(0.0, 0.0), (5.0, 5.0)]),
            lp(&[(0.0, 0.0), (1.0, 1.0), (2.0, 2.0)]),
            lp(&[(1.0, 1.0), (1.0, 1.0), (1.0, 1.0), (1.0, 1.0)]),
            vec![],
        ];
        assert!(matches!(
            ClipRegion::new(&loops),
            Err(CropError::NoValidGeometry)
        ));
    }

    #[test]
    fn test_degenerate_loops_dropped() {
        let loops = vec![square(2.0, 6.0), lp(&[(100.0, 100.0), (200.0, 200.0)])];
        let region = ClipRegion::new(&loops).unwrap();

        assert_eq!(region.loops.len(), 1);
        // Bounds only cover the surviving loop
        assert_eq!(region.bounds, Rectangle::new(2, 2, 4, 4));
    }

    #[test]
    fn test_loops_translated_to_origin() {
        let loops = vec![lp(&[(3.5, 4.0), (9.0, 4.0), (9.0, 8.5)])];
        let region = ClipRegion::new(&loops).unwrap();

        assert_eq!(region.bounds, Rectangle::new(3, 4, 6, 5));
        assert_eq!(region.loops[0][0], Point::new(0.5, 0.0));
        assert_eq!(region.loops[0][2], Point::new(6.0, 4.5));
    }

    #[test]
    fn test_far_loops_are_out_of_range() {
        let loops = vec![lp(&[(3.0e9, 10.0), (3.0e9 + 10.0, 10.0), (3.0e9, 20.0)])];
        assert!(matches!(
            ClipRegion::new(&loops),
            Err(CropError::OutOfRange { .. })
        ));
    }

    #[test]
    fn test_closing_point_sanitized() {
        let loops = vec![lp(&[(0.0, 0.0), (4.0, 0.0), (4.0, 4.0), (0.0, 0.0)])];
        let region = ClipRegion::new(&loops).unwrap();
        assert_eq!(region.loops[0].len(), 3);
    }

    #[test]
    fn test_triangle_clip() {
        let img = test_image(10, 10);
        let region = ClipRegion::new(&[lp(&[(0.0, 0.0), (10.0, 0.0), (0.0, 10.0)])]).unwrap();
        let out = clip_polygon_pixels(&img, &region).unwrap();

        assert_eq!(out.dimensions(), (10, 10));
        // Outside the triangle: fully transparent
        assert_eq!(out.get_pixel(9, 9)[3], 0);
        // Inside: the source pixel
        assert_eq!(out.get_pixel(1, 1), img.get_pixel(1, 1));
    }

    #[test]
    fn test_nested_loops_make_a_ring() {
        let img = test_image(20, 20);
        // Same orientation: the inner square is covered twice and becomes a hole
        let loops = vec![square(0.0, 20.0), square(5.0, 15.0)];
        let region = ClipRegion::new(&loops).unwrap();
        let out = clip_polygon_pixels(&img, &region).unwrap();

        assert_eq!(out.get_pixel(10, 10)[3], 0);
        assert_eq!(out.get_pixel(2, 2), img.get_pixel(2, 2));
        assert_eq!(out.get_pixel(17, 10), img.get_pixel(17, 10));
    }

    #[test]
    fn test_overlapping_loops_cancel() {
        let img = test_image(30, 20);
        let a = lp(&[(0.0, 0.0), (20.0, 0.0), (20.0, 20.0), (0.0, 20.0)]);
        let b = lp(&[(10.0, 0.0), (30.0, 0.0), (30.0, 20.0), (10.0, 20.0)]);
        let region = ClipRegion::new(&[a, b]).unwrap();
        let out = clip_polygon_pixels(&img, &region).unwrap();

        assert_eq!(out.dimensions(), (30, 20));
        assert_eq!(out.get_pixel(5, 10)[3], 255);
        assert_eq!(out.get_pixel(15, 10)[3], 0);
        assert_eq!(out.get_pixel(25, 10)[3], 255);
    }

    #[test]
    fn test_offset_region_samples_shifted_source() {
        let img = test_image(20, 20);
        let region = ClipRegion::new(&[square(4.0, 12.0)]).unwrap();
        let out = clip_polygon_pixels(&img, &region).unwrap();

        assert_eq!(out.dimensions(), (8, 8));
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(4, 4));
        assert_eq!(out.get_pixel(7, 7), img.get_pixel(11, 11));
    }

    #[test]
    fn test_region_outside_source_is_transparent() {
        let img = test_image(10, 10);
        let region = ClipRegion::new(&[square(50.0, 60.0)]).unwrap();
        let out = clip_polygon_pixels(&img, &region).unwrap();

        assert_eq!(out.dimensions(), (10, 10));
        assert!(out.pixels().all(|p| p[3] == 0));
    }

    #[test]
    fn test_pixmap_round_trip_opaque() {
        let img = test_image(6, 4);
        let pixmap = pixmap_from_rgba(&img).unwrap();
        assert_eq!(rgba_from_pixmap(&pixmap).unwrap().as_raw(), img.as_raw());
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
