// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Grayscale reduction and optional Gaussian pre-blur of the luminance plane.

use image::{GrayImage, Luma};
use imageproc::filter::gaussian_blur_f32;
use rectscan_core::{LuminanceBuffer, RgbaBuffer};
use tracing::{debug, instrument};

/// Collapse an RGBA buffer to one luminance value per pixel.
///
/// Luminance is the unweighted mean of R, G and B; alpha is ignored.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn to_luminance(image: &RgbaBuffer) -> LuminanceBuffer {
    let luminance = LuminanceBuffer::from_fn(image.width(), image.height(), |x, y| {
        let [r, g, b, _] = image.pixel(x, y);
        (r as f64 + g as f64 + b as f64) / 3.0
    });
    debug!(pixels = luminance.values().len(), "Luminance computed");
    luminance
}

/// Smooth the luminance plane with a Gaussian of standard deviation `sigma`.
///
/// The plane is quantised to 8 bits for the blur, so sub-integer luminance
/// detail is lost. `sigma` must be positive.
#[instrument(skip(luminance), fields(width = luminance.width(), height = luminance.height()))]
pub fn blur(luminance: &LuminanceBuffer, sigma: f32) -> LuminanceBuffer {
    let (width, height) = (luminance.width(), luminance.height());
    if width == 0 || height == 0 {
        return luminance.clone();
    }

    let mut gray = GrayImage::new(width, height);
    for (x, y, pixel) in gray.enumerate_pixels_mut() {
        let value = luminance.get(x, y).round().clamp(0.0, 255.0) as u8;
        *pixel = Luma([value]);
    }

    let blurred = gaussian_blur_f32(&gray, sigma);
    debug!(sigma, "Applied Gaussian blur");

    LuminanceBuffer::from_fn(width, height, |x, y| blurred.get_pixel(x, y).0[0] as f64)
}

// -- Tests --------------------------------------------------------------------
