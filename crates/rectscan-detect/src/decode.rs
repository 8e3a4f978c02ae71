// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Decode adapter — turns encoded image files into the straight-alpha 8-bit
// RGBA buffers the pipeline consumes. The pipeline itself never decodes.

use std::path::Path;

use image::DynamicImage;
use rectscan_core::RgbaBuffer;
use rectscan_core::error::{RectscanError, Result};
use tracing::{debug, info, instrument};

/// Convert any decoded image to 8-bit straight-alpha RGBA.
pub fn from_dynamic(image: &DynamicImage) -> Result<RgbaBuffer> {
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    RgbaBuffer::new(width, height, rgba.into_raw())
}

/// Decode an encoded image (PNG, JPEG, etc.) from memory.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_bytes(data: &[u8]) -> Result<RgbaBuffer> {
    let image = image::load_from_memory(data)
        .map_err(|err| RectscanError::Decode(format!("failed to decode image: {}", err)))?;
    debug!(
        width = image.width(),
        height = image.height(),
        "Image decoded from bytes"
    );
    from_dynamic(&image)
}

/// Open and decode an image file.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open(path: impl AsRef<Path>) -> Result<RgbaBuffer> {
    let image = image::open(path.as_ref()).map_err(|err| {
        RectscanError::Decode(format!(
            "failed to open {}: {}",
            path.as_ref().display(),
            err
        ))
    })?;
    info!(
        width = image.width(),
        height = image.height(),
        "Image loaded"
    );
    from_dynamic(&image)
}
