// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Post-fit corner ordering.

use rectscan_core::{CornerOrder, Quadrilateral};

/// Reorder corners clockwise on screen (y grows downward), starting from the
/// corner with the smallest `x + y`.
///
/// Corners are sorted by angle around the centroid; ties on the start corner
/// prefer the smaller `y`, then the smaller `x`. Degenerate quadrilaterals
/// still come back with all four corners, in some deterministic order.
pub fn normalize_corners(quad: &Quadrilateral) -> Quadrilateral {
    let centre = quad.centroid();
    let mut corners = quad.corners;

    // atan2 with y down increases clockwise on screen.
    corners.sort_by(|a, b| {
        let ta = (a.y - centre.y).atan2(a.x - centre.x);
        let tb = (b.y - centre.y).atan2(b.x - centre.x);
        ta.total_cmp(&tb)
    });

    let start = (0..4)
        .min_by(|&i, &j| {
            let (a, b) = (corners[i], corners[j]);
            (a.x + a.y)
                .total_cmp(&(b.x + b.y))
                .then_with(|| a.y.total_cmp(&b.y))
                .then_with(|| a.x.total_cmp(&b.x))
        })
        .unwrap_or(0);
    corners.rotate_left(start);

    Quadrilateral::new(corners)
}

/// Apply the configured ordering policy.
pub fn apply_order(quad: Quadrilateral, order: CornerOrder) -> Quadrilateral {
    match order {
        CornerOrder::AsFitted => quad,
        CornerOrder::ClockwiseFromTopLeft => normalize_corners(&quad),
    }
}
