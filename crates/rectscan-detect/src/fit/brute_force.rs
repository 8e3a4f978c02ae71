// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Brute-force quadrilateral enumeration. Kept as a selectable strategy so it
// can be compared against rotating calipers; it is not a good rectangle
// fitter.

use rectscan_core::{Contour, PointF, Quadrilateral};

use super::{MIN_FIT_POINTS, RectangleFitter};

/// Picks the 4-point subset `p1, p2, p3, p4` (contour indices `i < j < k < l`)
/// minimising `|p1 p2| * |p2 p3|`.
///
/// The score uses only two of the four sides, not the true area. Ties keep
/// the lexicographically first subset. Since `p4` never enters the score the
/// first admissible `l = k + 1` is the only one that can win, so the O(n^4)
/// enumeration reduces to O(n^3) without changing the result; that is still
/// impractical beyond a few hundred points.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BruteForceQuad;

#[inline]
fn distance(a: PointF, b: PointF) -> f64 {
    (b.x - a.x).hypot(b.y - a.y)
}

impl RectangleFitter for BruteForceQuad {
    fn name(&self) -> &'static str {
        "brute_force_quad"
    }

    fn fit(&self, contour: &Contour) -> Option<Quadrilateral> {
        let n = contour.len();
        if n < MIN_FIT_POINTS {
            return None;
        }
        let points: Vec<PointF> = contour.points().iter().map(|&p| PointF::from(p)).collect();

        let mut best_score = f64::INFINITY;
        let mut best = [0usize, 1, 2, 3];
        for i in 0..n {
            for j in i + 1..n {
                let side_a = distance(points[i], points[j]);
                for k in j + 1..n {
                    let score = side_a * distance(points[j], points[k]);
                    if score < best_score && k + 1 < n {
                        best_score = score;
                        best = [i, j, k, k + 1];
                    }
                }
            }
        }

        Some(Quadrilateral::new(best.map(|idx| points[idx])))
    }
}
