// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic scenes shared by the integration tests.

#![allow(dead_code)]

use rectscan_core::{Contour, Point, Quadrilateral, RgbaBuffer};

pub const DARK: [u8; 4] = [20, 20, 20, 255];
pub const LIGHT: [u8; 4] = [235, 235, 235, 255];

/// A uniformly coloured canvas.
pub fn canvas(width: u32, height: u32, colour: [u8; 4]) -> RgbaBuffer {
    RgbaBuffer::from_pixel(width, height, colour).unwrap()
}

/// Fill the `w x h` block whose top-left pixel is `(x0, y0)`.
pub fn fill_rect(img: &mut RgbaBuffer, x0: u32, y0: u32, w: u32, h: u32, colour: [u8; 4]) {
    for y in y0..y0 + h {
        for x in x0..x0 + w {
            img.put_pixel(x, y, colour);
        }
    }
}

/// Fill every pixel with `|x - cx| + |y - cy| <= radius`.
pub fn fill_diamond(img: &mut RgbaBuffer, cx: i64, cy: i64, radius: i64, colour: [u8; 4]) {
    for y in 0..img.height() {
        for x in 0..img.width() {
            if (x as i64 - cx).abs() + (y as i64 - cy).abs() <= radius {
                img.put_pixel(x, y, colour);
            }
        }
    }
}

/// Outline of the square with corners (50,10), (90,50), (50,90), (10,50),
/// walked in unit diagonal steps.
pub fn diamond_contour() -> Contour {
    let mut points = Vec::new();
    let (mut x, mut y) = (50i64, 10i64);
    for (dx, dy) in [(1, 1), (-1, 1), (-1, -1), (1, -1)] {
        for _ in 0..40 {
            points.push(Point::new(x as u32, y as u32));
            x += dx;
            y += dy;
        }
    }
    Contour::new(points)
}

/// Assert that `quad`'s axis-aligned extent matches the filled block
/// `(x0, y0, w, h)` within `tol` pixels per coordinate.
pub fn assert_covers_block(quad: &Quadrilateral, x0: u32, y0: u32, w: u32, h: u32, tol: f64) {
    let bb = quad.bounding_box();
    let expected = [
        x0 as f64,
        y0 as f64,
        (x0 + w - 1) as f64,
        (y0 + h - 1) as f64,
    ];
    let actual = [bb.min_x, bb.min_y, bb.max_x, bb.max_y];
    for (e, a) in expected.iter().zip(actual.iter()) {
        assert!(
            (e - a).abs() <= tol,
            "expected extent {expected:?}, got {actual:?} (tolerance {tol})"
        );
    }
}
