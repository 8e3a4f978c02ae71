// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// rectscan-detect — Rectangle detection for the Rectscan pipeline.
//
// Provides the analysis stages (grayscale reduction, Sobel edge magnitude,
// contour extraction, quadrilateral fitting), the `RectangleDetector` that
// chains them, a decode adapter for encoded image files, and the result
// assembler that numbers detections for transport.

pub mod contours;
pub mod corners;
pub mod decode;
pub mod fit;
pub mod grayscale;
pub mod pipeline;
pub mod report;
pub mod sobel;

// Re-export the primary entry points so callers can use `rectscan_detect::RectangleDetector` etc.
pub use fit::{BruteForceQuad, RectangleFitter, RotatingCalipers};
pub use pipeline::{DetectionTrace, RectangleDetector, detect_rectangles};
pub use report::assemble;
