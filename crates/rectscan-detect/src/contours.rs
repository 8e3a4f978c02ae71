// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Contour extraction — groups 4-connected edge pixels into contours with an
// explicit-stack depth-first walk.

use rectscan_core::{Contour, EdgeMap, Point};
use tracing::{debug, instrument};

/// Neighbour visiting order for the walk: up, down, left, right.
const NEIGHBOURS: [(i64, i64); 4] = [(0, -1), (0, 1), (-1, 0), (1, 0)];

/// One pending pixel on the walk stack, plus the index of the next neighbour
/// to try from it.
struct Frame {
    x: u32,
    y: u32,
    next: usize,
}

/// Find every maximal 4-connected region of pixels with magnitude above
/// `threshold`.
///
/// Regions are reported in raster order of their first pixel. Points inside a
/// region appear in depth-first preorder, the same order a recursive walk
/// would produce, but the walk keeps its own stack so a region covering the
/// whole image cannot exhaust the call stack.
#[instrument(skip(edges), fields(width = edges.width(), height = edges.height()))]
pub fn extract_contours(edges: &EdgeMap, threshold: f64) -> Vec<Contour> {
    let (width, height) = (edges.width(), edges.height());
    let mut visited = vec![false; width as usize * height as usize];
    let mut stack: Vec<Frame> = Vec::new();
    let mut contours = Vec::new();

    for y in 0..height {
        for x in 0..width {
            let idx = y as usize * width as usize + x as usize;
            if visited[idx] || !edges.is_edge(x, y, threshold) {
                continue;
            }

            visited[idx] = true;
            let mut points = vec![Point::new(x, y)];
            stack.push(Frame { x, y, next: 0 });

            while let Some(top) = stack.last_mut() {
                let Some(&(dx, dy)) = NEIGHBOURS.get(top.next) else {
                    stack.pop();
                    continue;
                };
                top.next += 1;

                let nx = top.x as i64 + dx;
                let ny = top.y as i64 + dy;
                if nx < 0 || ny < 0 || nx >= width as i64 || ny >= height as i64 {
                    continue;
                }
                let (nx, ny) = (nx as u32, ny as u32);
                let nidx = ny as usize * width as usize + nx as usize;
                if visited[nidx] {
                    continue;
                }
                // Non-edge neighbours are marked too; they can never seed a
                // contour so this only saves rechecking them.
                visited[nidx] = true;
                if edges.is_edge(nx, ny, threshold) {
                    points.push(Point::new(nx, ny));
                    stack.push(Frame {
                        x: nx,
                        y: ny,
                        next: 0,
                    });
                }
            }

            contours.push(Contour::new(points));
        }
    }

    debug!(contours = contours.len(), "Contours extracted");
    contours
}

/// Keep only contours with strictly more than `min_points` points.
pub fn discard_small(contours: Vec<Contour>, min_points: usize) -> Vec<Contour> {
    let before = contours.len();
    let kept: Vec<Contour> = contours
        .into_iter()
        .filter(|c| c.len() > min_points)
        .collect();
    debug!(before, kept = kept.len(), min_points, "Small contours discarded");
    kept
}

// -- Tests --------------------------------------------------------------------
