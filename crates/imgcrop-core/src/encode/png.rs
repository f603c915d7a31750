//! PNG encoding for crop outputs.
//!
//! This module uses the `png` crate directly rather than going through the
//! `image` crate's encoder, so the output resolution can be written into the
//! `pHYs` chunk.

use std::io::Cursor;

use png::{BitDepth, ColorType, Encoder, PixelDimensions, Unit};

use crate::error::CropError;

const METERS_PER_INCH: f64 = 0.0254;

/// Channel layout of a pixel buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelLayout {
    /// 3 bytes per pixel, fully opaque.
    Rgb,
    /// 4 bytes per pixel, straight (non-premultiplied) alpha.
    Rgba,
}

impl PixelLayout {
    #[inline]
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            PixelLayout::Rgb => 3,
            PixelLayout::Rgba => 4,
        }
    }

    fn color_type(self) -> ColorType {
        match self {
            PixelLayout::Rgb => ColorType::Rgb,
            PixelLayout::Rgba => ColorType::Rgba,
        }
    }
}

/// Encode pixel data to PNG bytes.
///
/// # Arguments
///
/// * `pixels` - Pixel data in row-major order, laid out as `layout`
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
/// * `layout` - RGB or RGBA
/// * `dpi` - Resolution stored in the `pHYs` chunk
///
/// # Errors
///
/// Returns `CropError::Encode` for zero dimensions, a buffer whose length
/// doesn't match the dimensions, or an encoder failure.
pub fn encode_png(
    pixels: &[u8],
    width: u32,
    height: u32,
    layout: PixelLayout,
    dpi: f64,
) -> Result<Vec<u8>, CropError> {
    if width == 0 || height == 0 {
        return Err(CropError::Encode(format!(
            "invalid dimensions {}x{}",
            width, height
        )));
    }

    let expected_len = (width as usize) * (height as usize) * layout.bytes_per_pixel();
    if pixels.len() != expected_len {
        return Err(CropError::Encode(format!(
            "expected {} bytes of pixel data, got {}",
            expected_len,
            pixels.len()
        )));
    }

    let mut buffer = Cursor::new(Vec::new());
    {
        let mut encoder = Encoder::new(&mut buffer, width, height);
        encoder.set_color(layout.color_type());
        encoder.set_depth(BitDepth::Eight);
        encoder.set_pixel_dims(Some(pixel_dims(dpi)));

        let mut writer = encoder
            .write_header()
            .map_err(|e| CropError::Encode(e.to_string()))?;
        writer
            .write_image_data(pixels)
            .map_err(|e| CropError::Encode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| CropError::Encode(e.to_string()))?;
    }

    Ok(buffer.into_inner())
}

fn pixel_dims(dpi: f64) -> PixelDimensions {
    let ppm = (dpi / METERS_PER_INCH).round() as u32;
    PixelDimensions {
        xppu: ppm,
        yppu: ppm,
        unit: Unit::Meter,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

    fn decode_info(bytes: &[u8]) -> (u32, u32, ColorType, Option<PixelDimensions>) {
        let reader = png::Decoder::new(Cursor::new(bytes)).read_info().unwrap();
        let info = reader.info();
        (info.width, info.height, info.color_type, info.pixel_dims)
    }

    #[test]
    fn test_encode_rgb() {
        let pixels = vec![128u8; 10 * 8 * 3];
        let bytes = encode_png(&pixels, 10, 8, PixelLayout::Rgb, 96.0).unwrap();

        assert_eq!(&bytes[0..8], &PNG_SIGNATURE);
        let (w, h, color, _) = decode_info(&bytes);
        assert_eq!((w, h), (10, 8));
        assert_eq!(color, ColorType::Rgb);
    }

    #[test]
    fn test_encode_rgba() {
        let pixels = vec![0u8; 4 * 4 * 4];
        let bytes = encode_png(&pixels, 4, 4, PixelLayout::Rgba, 96.0).unwrap();

        let (_, _, color, _) = decode_info(&bytes);
        assert_eq!(color, ColorType::Rgba);
    }

    #[test]
    fn test_resolution_written() {
        let pixels = vec![255u8; 3];
        let bytes = encode_png(&pixels, 1, 1, PixelLayout::Rgb, 96.0).unwrap();

        let dims = decode_info(&bytes).3.unwrap();
        assert_eq!(dims.unit, Unit::Meter);
        // 96 / 0.0254 = 3779.5
        assert_eq!(dims.xppu, 3780);
        assert_eq!(dims.yppu, 3780);
    }

    #[test]
    fn test_resolution_300_dpi() {
        let pixels = vec![255u8; 4];
        let bytes = encode_png(&pixels, 1, 1, PixelLayout::Rgba, 300.0).unwrap();

        let dims = decode_info(&bytes).3.unwrap();
        assert_eq!(dims.xppu, 11811);
    }

    #[test]
    fn test_zero_dimensions() {
        let result = encode_png(&[], 0, 10, PixelLayout::Rgb, 96.0);
        assert!(matches!(result, Err(CropError::Encode(_))));

        let result = encode_png(&[], 10, 0, PixelLayout::Rgba, 96.0);
        assert!(matches!(result, Err(CropError::Encode(_))));
    }

    #[test]
    fn test_buffer_length_mismatch() {
        // RGB-sized buffer declared as RGBA
        let pixels = vec![0u8; 5 * 5 * 3];
        let result = encode_png(&pixels, 5, 5, PixelLayout::Rgba, 96.0);
        assert!(matches!(result, Err(CropError::Encode(_))));
    }
}
