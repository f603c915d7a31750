//! Output encoding for imgcrop.
//!
//! This module provides functionality for:
//! - Encoding RGB or RGBA buffers to PNG, with the resolution stored in the
//!   `pHYs` chunk
//! - Persisting encoded bytes atomically, so a failed crop never leaves a
//!   partial file behind
//!
//! # Examples
//!
//! ```ignore
//! use imgcrop_core::encode::{encode_png, write_atomic, PixelLayout};
//!
//! let pixels = vec![128u8; 100 * 100 * 3]; // Gray image
//! let png_bytes = encode_png(&pixels, 100, 100, PixelLayout::Rgb, 96.0).unwrap();
//! write_atomic(Path::new("gray.png"), &png_bytes).unwrap();
//! ```

mod persist;
mod png;

pub use self::png::{encode_png, PixelLayout};
pub use persist::write_atomic;
