// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Detector configuration: edge threshold, contour size filter, fitting
// strategy and gradient kernels.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RectscanError, Result};

/// Contours with this many points or fewer are discarded before fitting.
pub const DEFAULT_MIN_CONTOUR_POINTS: usize = 50;

/// Pixels with a gradient magnitude strictly above this count as edges.
pub const DEFAULT_EDGE_THRESHOLD: f64 = 0.0;

/// Which rectangle-fitting strategy the detector uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FitPolicy {
    /// Minimum-area oriented bounding box over candidate edge orientations.
    #[default]
    RotatingCalipers,
    /// Exhaustive 4-point subset search scored by two adjacent side lengths.
    /// Cubic in contour length; only practical for small contours.
    BruteForceQuad,
}

/// Where the rotating-calipers fitter takes its candidate orientations from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CaliperEdges {
    /// Consecutive contour points in discovery order, wrapping.
    #[default]
    ContourOrder,
    /// Edges of the contour's convex hull.
    ConvexHull,
}

/// Post-fit ordering of the four corners.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CornerOrder {
    /// Whatever order the fitter produced.
    #[default]
    AsFitted,
    /// Clockwise on screen (y down), starting at the corner nearest the origin.
    ClockwiseFromTopLeft,
}

/// The two 3x3 gradient kernels, indexed `[row][column]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SobelKernels {
    pub gx: [[f64; 3]; 3],
    pub gy: [[f64; 3]; 3],
}

impl Default for SobelKernels {
    fn default() -> Self {
        Self {
            gx: [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]],
            gy: [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]],
        }
    }
}

/// Tunable constants for one detector instance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Edge-presence threshold (magnitude must be strictly greater).
    pub edge_threshold: f64,
    /// Contours with `len <= min_contour_points` are dropped.
    pub min_contour_points: usize,
    /// Rectangle fitting strategy.
    pub fit_policy: FitPolicy,
    /// Candidate orientation source for rotating calipers.
    pub caliper_edges: CaliperEdges,
    /// Corner ordering applied after fitting.
    pub corner_order: CornerOrder,
    /// Optional Gaussian blur applied to the luminance plane before Sobel.
    pub blur_sigma: Option<f32>,
    /// Gradient kernels.
    pub sobel: SobelKernels,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            edge_threshold: DEFAULT_EDGE_THRESHOLD,
            min_contour_points: DEFAULT_MIN_CONTOUR_POINTS,
            fit_policy: FitPolicy::default(),
            caliper_edges: CaliperEdges::default(),
            corner_order: CornerOrder::default(),
            blur_sigma: None,
            sobel: SobelKernels::default(),
        }
    }
}

impl DetectorConfig {
    /// Parse a JSON config; absent fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&text)
    }

    /// Reject values the pipeline cannot honour.
    pub fn validate(&self) -> Result<()> {
        if !(self.edge_threshold >= 0.0) {
            return Err(RectscanError::InvalidConfig(format!(
                "edge_threshold must be a non-negative number, got {}",
                self.edge_threshold
            )));
        }
        if let Some(sigma) = self.blur_sigma {
            if !(sigma > 0.0 && sigma.is_finite()) {
                return Err(RectscanError::InvalidConfig(format!(
                    "blur_sigma must be positive and finite, got {sigma}"
                )));
            }
        }
        let mut weights = self.sobel.gx.iter().chain(self.sobel.gy.iter()).flatten();
        if weights.any(|w| !w.is_finite()) {
            return Err(RectscanError::InvalidConfig(
                "sobel kernel weights must be finite".into(),
            ));
        }
        Ok(())
    }
}

// -- Tests --------------------------------------------------------------------
