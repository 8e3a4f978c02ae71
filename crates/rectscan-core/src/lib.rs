// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectscan — Core types, configuration and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod types;

pub use config::{CaliperEdges, CornerOrder, DetectorConfig, FitPolicy, SobelKernels};
pub use error::{RectscanError, Result};
pub use types::*;
