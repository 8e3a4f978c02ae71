// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Criterion benchmarks for the rectscan-detect crate: the full detection
// pipeline and the Sobel stage on small synthetic images.

use criterion::{Criterion, black_box, criterion_group, criterion_main};

use rectscan_core::{RgbaBuffer, SobelKernels};
use rectscan_detect::RectangleDetector;
use rectscan_detect::grayscale::to_luminance;
use rectscan_detect::sobel::sobel;

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A 200x200 dark image with two light rectangles, the same pattern the
/// integration tests use.
fn two_rectangles() -> RgbaBuffer {
    let mut img = RgbaBuffer::from_pixel(200, 200, [20, 20, 20, 255]).unwrap();
    for (x0, y0, w, h) in [(20, 20, 30, 20), (100, 110, 50, 40)] {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                img.put_pixel(x, y, [235, 235, 235, 255]);
            }
        }
    }
    img
}

// ---------------------------------------------------------------------------
// Benchmarks
// ---------------------------------------------------------------------------

/// Full pipeline with the default configuration. Fitting dominates: each
/// edge ring is a few hundred points and calipers is quadratic in that.
fn bench_detect(c: &mut Criterion) {
    let img = two_rectangles();
    let detector = RectangleDetector::default();

    c.bench_function("detect (200x200, two rectangles)", |b| {
        b.iter(|| black_box(detector.detect(black_box(&img))));
    });
}

/// Sobel magnitude alone on a precomputed luminance plane.
fn bench_sobel(c: &mut Criterion) {
    let luminance = to_luminance(&two_rectangles());
    let kernels = SobelKernels::default();

    c.bench_function("sobel (200x200)", |b| {
        b.iter(|| black_box(sobel(black_box(&luminance), &kernels)));
    });
}

criterion_group!(benches, bench_detect, bench_sobel);
criterion_main!(benches);
