// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectangle fitting — turns one contour into one quadrilateral. Two strategies
// sit behind the `RectangleFitter` trait: rotating calipers (the default) and
// brute-force quadrilateral enumeration.

pub mod brute_force;
pub mod calipers;

use rectscan_core::{Contour, DetectorConfig, FitPolicy, Quadrilateral};

pub use brute_force::BruteForceQuad;
pub use calipers::RotatingCalipers;

/// Fewest contour points a fitter will accept.
pub const MIN_FIT_POINTS: usize = 4;

/// A strategy that fits four corners to a contour.
///
/// Implementations are stateless and shareable across threads.
pub trait RectangleFitter: Send + Sync {
    /// Short stable name for logs.
    fn name(&self) -> &'static str;

    /// Fit a quadrilateral to `contour`.
    ///
    /// Returns `None` when the contour has fewer than [`MIN_FIT_POINTS`]
    /// points. Degenerate inputs (collinear points) still produce a
    /// quadrilateral, possibly with zero area.
    fn fit(&self, contour: &Contour) -> Option<Quadrilateral>;
}

/// Build the fitter selected by `config.fit_policy`.
pub fn fitter_for(config: &DetectorConfig) -> Box<dyn RectangleFitter> {
    match config.fit_policy {
        FitPolicy::RotatingCalipers => Box::new(RotatingCalipers::new(config.caliper_edges)),
        FitPolicy::BruteForceQuad => Box::new(BruteForceQuad),
    }
}
