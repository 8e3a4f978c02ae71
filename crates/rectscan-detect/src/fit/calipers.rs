// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rotating calipers — minimum-area oriented bounding box over a set of
// candidate orientations.

use std::collections::HashSet;

use imageproc::geometry::convex_hull;
use imageproc::point::Point as HullPoint;
use rectscan_core::{CaliperEdges, Contour, PointF, Quadrilateral};
use tracing::trace;

use super::{MIN_FIT_POINTS, RectangleFitter};

/// Minimum-area enclosing rectangle, trying each candidate edge direction as
/// the box orientation.
///
/// With [`CaliperEdges::ContourOrder`] the candidates are the directions from
/// each contour point to the next (wrapping), O(n^2) overall. With
/// [`CaliperEdges::ConvexHull`] they are the hull edges, which recovers the
/// true orientation of rasterised rotated outlines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotatingCalipers {
    edges: CaliperEdges,
}

impl RotatingCalipers {
    pub fn new(edges: CaliperEdges) -> Self {
        Self { edges }
    }
}

impl Default for RotatingCalipers {
    fn default() -> Self {
        Self::new(CaliperEdges::default())
    }
}

/// Axis-aligned box of `points` after rotating them by `-angle`.
struct OrientedBox {
    angle: f64,
    min_u: f64,
    max_u: f64,
    min_v: f64,
    max_v: f64,
}

impl OrientedBox {
    fn enclose(points: &[PointF], angle: f64) -> Self {
        let (sin, cos) = angle.sin_cos();
        let mut b = Self {
            angle,
            min_u: f64::INFINITY,
            max_u: f64::NEG_INFINITY,
            min_v: f64::INFINITY,
            max_v: f64::NEG_INFINITY,
        };
        for p in points {
            let u = p.x * cos + p.y * sin;
            let v = -p.x * sin + p.y * cos;
            b.min_u = b.min_u.min(u);
            b.max_u = b.max_u.max(u);
            b.min_v = b.min_v.min(v);
            b.max_v = b.max_v.max(v);
        }
        b
    }

    fn area(&self) -> f64 {
        (self.max_u - self.min_u) * (self.max_v - self.min_v)
    }

    /// Corners rotated back into image space.
    fn corners(&self) -> [PointF; 4] {
        let (sin, cos) = self.angle.sin_cos();
        let back = |u: f64, v: f64| PointF::new(u * cos - v * sin, u * sin + v * cos);
        [
            back(self.min_u, self.min_v),
            back(self.max_u, self.min_v),
            back(self.max_u, self.max_v),
            back(self.min_u, self.max_v),
        ]
    }
}

/// Convex hull vertices of the contour's pixels, without collinear points.
fn hull_points(contour: &Contour) -> Vec<PointF> {
    let mut pixels: Vec<HullPoint<i64>> = contour
        .points()
        .iter()
        .map(|p| HullPoint::new(i64::from(p.x), i64::from(p.y)))
        .collect();
    // The hull's angular sort has no equal case; drop repeated pixels first.
    pixels.sort_unstable_by_key(|p| (p.y, p.x));
    pixels.dedup();

    convex_hull(pixels)
        .into_iter()
        .map(|p| PointF::new(p.x as f64, p.y as f64))
        .collect()
}

/// Best box over the directions of `chain[i] -> chain[i + 1]` (wrapping).
///
/// Zero-length steps are skipped and an angle already tried is not retried;
/// ties keep the earliest candidate.
fn min_area_box(points: &[PointF], chain: &[PointF]) -> Option<OrientedBox> {
    let n = chain.len();
    let mut tried: HashSet<u64> = HashSet::new();
    let mut best: Option<OrientedBox> = None;

    for i in 0..n {
        let a = chain[i];
        let b = chain[(i + 1) % n];
        let (dx, dy) = (b.x - a.x, b.y - a.y);
        if dx == 0.0 && dy == 0.0 {
            continue;
        }
        let angle = dy.atan2(dx);
        if !tried.insert(angle.to_bits()) {
            continue;
        }

        let candidate = OrientedBox::enclose(points, angle);
        if best.as_ref().is_none_or(|b| candidate.area() < b.area()) {
            best = Some(candidate);
        }
    }

    if let Some(b) = &best {
        trace!(candidates = tried.len(), angle = b.angle, area = b.area(), "Caliper search done");
    }
    best
}

impl RectangleFitter for RotatingCalipers {
    fn name(&self) -> &'static str {
        "rotating_calipers"
    }

    fn fit(&self, contour: &Contour) -> Option<Quadrilateral> {
        if contour.len() < MIN_FIT_POINTS {
            return None;
        }
        let points: Vec<PointF> = contour.points().iter().map(|&p| PointF::from(p)).collect();

        let best = match self.edges {
            CaliperEdges::ContourOrder => min_area_box(&points, &points),
            CaliperEdges::ConvexHull => {
                let hull = hull_points(contour);
                min_area_box(&hull, &hull)
            }
        };

        // Every step was zero-length: all points coincide.
        let best = best.unwrap_or_else(|| OrientedBox::enclose(&points, 0.0));
        Some(Quadrilateral::new(best.corners()))
    }
}

// -- Tests --------------------------------------------------------------------
