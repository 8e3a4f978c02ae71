// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Sobel gradient magnitude over a luminance plane.

use rectscan_core::{EdgeMap, LuminanceBuffer, SobelKernels};
use tracing::{debug, instrument};

/// Compute the gradient magnitude `sqrt(gx^2 + gy^2)` for every interior
/// pixel.
///
/// The one-pixel border ring is left at zero since the 3x3 kernels have no
/// complete neighbourhood there; planes narrower or shorter than 3 pixels are
/// therefore all zero. No thresholding happens here.
#[instrument(skip(luminance, kernels), fields(width = luminance.width(), height = luminance.height()))]
pub fn sobel(luminance: &LuminanceBuffer, kernels: &SobelKernels) -> EdgeMap {
    let (width, height) = (luminance.width(), luminance.height());

    let edges = EdgeMap::from_fn(width, height, |x, y| {
        if x == 0 || y == 0 || x + 1 >= width || y + 1 >= height {
            return 0.0;
        }
        let gx = convolve_at(luminance, &kernels.gx, x, y);
        let gy = convolve_at(luminance, &kernels.gy, x, y);
        gx.hypot(gy)
    });

    debug!(nonzero = edges.count_above(0.0), "Sobel magnitude computed");
    edges
}

/// Apply a 3x3 kernel centred on the interior pixel `(x, y)`.
///
/// Positive and negative lobes are summed separately and subtracted at the
/// end, so a flat neighbourhood under a symmetric kernel yields exactly zero
/// even for non-representable luminance values such as `100 / 3`.
#[inline]
fn convolve_at(luminance: &LuminanceBuffer, kernel: &[[f64; 3]; 3], x: u32, y: u32) -> f64 {
    let mut positive = 0.0;
    let mut negative = 0.0;
    for (ky, row) in kernel.iter().enumerate() {
        for (kx, &weight) in row.iter().enumerate() {
            if weight == 0.0 {
                continue;
            }
            let sample = luminance.get(x + kx as u32 - 1, y + ky as u32 - 1);
            if weight > 0.0 {
                positive += weight * sample;
            } else {
                negative += -weight * sample;
            }
        }
    }
    positive - negative
}

// -- Tests --------------------------------------------------------------------
