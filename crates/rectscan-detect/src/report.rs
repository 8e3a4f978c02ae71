// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Result assembler — numbers detections for transport.

use rectscan_core::{Quadrilateral, RectangleRecord};

/// Pair each quadrilateral with its zero-based position in `quads`.
pub fn assemble(quads: &[Quadrilateral]) -> Vec<RectangleRecord> {
    quads
        .iter()
        .enumerate()
        .map(|(id, quad)| RectangleRecord {
            id,
            coordinates: quad.to_coordinates(),
        })
        .collect()
}
