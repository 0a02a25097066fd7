//! Frame decoding

use crate::Result;
use image::RgbaImage;
use std::path::Path;

/// Decodes a frame file into an RGBA image buffer
pub fn decode_frame(path: &Path) -> Result<RgbaImage> {
    let img = image::open(path)?;
    Ok(img.to_rgba8())
}
