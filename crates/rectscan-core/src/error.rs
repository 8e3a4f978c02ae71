// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Rectscan.

use thiserror::Error;

/// Top-level error type for all Rectscan operations.
///
/// Degenerate geometry (tiny contours, zero-area boxes) is never reported
/// here; only input that cannot be processed at all is.
#[derive(Debug, Error)]
pub enum RectscanError {
    // -- Input errors --
    #[error(
        "malformed pixel buffer: {width}x{height}x{channels} needs {expected} bytes, got {actual}"
    )]
    MalformedBuffer {
        width: u32,
        height: u32,
        channels: usize,
        expected: usize,
        actual: usize,
    },

    #[error("image dimensions {width}x{height} overflow the addressable buffer size")]
    DimensionOverflow { width: u32, height: u32 },

    #[error("image decoding failed: {0}")]
    Decode(String),

    // -- Configuration --
    #[error("invalid detector configuration: {0}")]
    InvalidConfig(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, RectscanError>;
