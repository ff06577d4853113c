// SPDX-FileCopyrightText: 2025-2026 Zexin Yuan <aim@yzx9.xyz>
//
// SPDX-License-Identifier: Apache-2.0

use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;

use crate::error::RemoteError;

/// Longest edge, in pixels, of an image sent for extraction.
pub const MAX_EDGE: u32 = 1024;

/// JPEG quality of an image sent for extraction.
pub const JPEG_QUALITY: u8 = 80;

/// Downscales a photo so its long edge is at most [`MAX_EDGE`] and re-encodes
/// it as JPEG.
///
/// # Errors
///
/// Returns an error if the bytes are not a supported image.
pub fn prepare_image(bytes: &[u8]) -> Result<Vec<u8>, RemoteError> {
    let image = image::load_from_memory(bytes)?;
    let (width, height) = (image.width(), image.height());
    let image = if width.max(height) > MAX_EDGE {
        image.resize(MAX_EDGE, MAX_EDGE, FilterType::Triangle)
    } else {
        image
    };

    let mut out = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut out, JPEG_QUALITY);
    image.to_rgb8().write_with_encoder(encoder)?;
    tracing::debug!(
        width,
        height,
        resized_width = image.width(),
        resized_height = image.height(),
        bytes = out.len(),
        "prepared image"
    );
    Ok(out)
}
