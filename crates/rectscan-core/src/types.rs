// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Rectscan pipeline: pixel buffers, contours and
// fitted quadrilaterals.

use serde::{Deserialize, Serialize};

use crate::error::{RectscanError, Result};

/// Number of interleaved samples per pixel in an [`RgbaBuffer`].
pub const RGBA_CHANNELS: usize = 4;

/// Compute `width * height * channels`, failing instead of wrapping.
pub fn expected_len(width: u32, height: u32, channels: usize) -> Result<usize> {
    (width as usize)
        .checked_mul(height as usize)
        .and_then(|pixels| pixels.checked_mul(channels))
        .ok_or(RectscanError::DimensionOverflow { width, height })
}

// -- Input image --------------------------------------------------------------

/// A decoded 8-bit RGBA image: row-major, top-left origin, straight
/// (non-premultiplied) alpha, channel order R, G, B, A.
///
/// The length invariant `data.len() == width * height * 4` is checked once at
/// construction; every pipeline stage relies on it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RgbaBuffer {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl RgbaBuffer {
    /// Wrap raw RGBA samples, rejecting buffers whose length does not match
    /// the stated dimensions.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        let expected = expected_len(width, height, RGBA_CHANNELS)?;
        if data.len() != expected {
            return Err(RectscanError::MalformedBuffer {
                width,
                height,
                channels: RGBA_CHANNELS,
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// A buffer filled with a single colour.
    pub fn from_pixel(width: u32, height: u32, rgba: [u8; 4]) -> Result<Self> {
        let len = expected_len(width, height, RGBA_CHANNELS)?;
        let data = rgba.iter().copied().cycle().take(len).collect();
        Self::new(width, height, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Borrow the raw interleaved samples.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// The `[r, g, b, a]` samples at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the image.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * RGBA_CHANNELS;
        [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ]
    }

    /// Overwrite the pixel at `(x, y)`.
    ///
    /// # Panics
    ///
    /// Panics if the coordinate lies outside the image.
    pub fn put_pixel(&mut self, x: u32, y: u32, rgba: [u8; 4]) {
        assert!(x < self.width && y < self.height, "pixel ({x}, {y}) out of bounds");
        let idx = (y as usize * self.width as usize + x as usize) * RGBA_CHANNELS;
        self.data[idx..idx + RGBA_CHANNELS].copy_from_slice(&rgba);
    }

    /// Iterate over pixels in row-major order as `[r, g, b, a]` slices.
    pub fn pixels(&self) -> impl Iterator<Item = &[u8]> {
        self.data.chunks_exact(RGBA_CHANNELS)
    }
}

// -- Scalar planes ------------------------------------------------------------

/// One real-valued luminance sample per pixel, nominally in `0.0..=255.0`.
#[derive(Debug, Clone, PartialEq)]
pub struct LuminanceBuffer {
    width: u32,
    height: u32,
    values: Vec<f64>,
}

impl LuminanceBuffer {
    pub fn new(width: u32, height: u32, values: Vec<f64>) -> Result<Self> {
        check_plane_len(width, height, values.len())?;
        Ok(Self {
            width,
            height,
            values,
        })
    }

    /// Build a plane by evaluating `f` at every pixel in row-major order.
    pub fn from_fn(width: u32, height: u32, f: impl FnMut(u32, u32) -> f64) -> Self {
        Self {
            width,
            height,
            values: sample_plane(width, height, f),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Luminance at `(x, y)`. The caller guarantees the coordinate is in bounds.
    #[inline]
    pub fn get(&self, x: u32, y: u32) -> f64 {
        self.values[y as usize * self.width as usize + x as usize]
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }
}

/// Per-pixel gradient magnitude, same shape as the luminance it came from.
///
/// The one-pixel border ring is always zero.
#[derive(Debug, Clone, PartialEq)]
pub struct EdgeMap {
    width: u32,
    height: u32,
    magnitudes: Vec<f64>,
}

impl EdgeMap {
    pub fn new(width: u32, height: u32, magnitudes: Vec<f64>) -> Result<Self> {
        check_plane_len(width, height, magnitudes.len())?;
        Ok(Self {
            width,
            height,
            magnitudes,
        })
    }

    /// Build a map by evaluating `f` at every pixel in row-major order.
    pub fn from_fn(width: u32, height: u32, f: impl FnMut(u32, u32) -> f64) -> Self {
        Self {
            width,
            height,
            magnitudes: sample_plane(width, height, f),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Magnitude at `(x, y)`. The caller guarantees the coordinate is in bounds.
    #[inline]
    pub fn magnitude(&self, x: u32, y: u32) -> f64 {
        self.magnitudes[y as usize * self.width as usize + x as usize]
    }

    /// Whether `(x, y)` counts as an edge pixel under `threshold`.
    #[inline]
    pub fn is_edge(&self, x: u32, y: u32, threshold: f64) -> bool {
        self.magnitude(x, y) > threshold
    }

    pub fn magnitudes(&self) -> &[f64] {
        &self.magnitudes
    }

    /// Number of pixels whose magnitude exceeds `threshold`.
    pub fn count_above(&self, threshold: f64) -> usize {
        self.magnitudes.iter().filter(|&&m| m > threshold).count()
    }
}

fn sample_plane(width: u32, height: u32, mut f: impl FnMut(u32, u32) -> f64) -> Vec<f64> {
    let mut values = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height {
        for x in 0..width {
            values.push(f(x, y));
        }
    }
    values
}

fn check_plane_len(width: u32, height: u32, actual: usize) -> Result<()> {
    let expected = expected_len(width, height, 1)?;
    if actual != expected {
        return Err(RectscanError::MalformedBuffer {
            width,
            height,
            channels: 1,
            expected,
            actual,
        });
    }
    Ok(())
}

// -- Geometry -----------------------------------------------------------------

/// An integer pixel coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }
}

/// A real-valued image-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PointF {
    pub x: f64,
    pub y: f64,
}

impl PointF {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

impl From<Point> for PointF {
    fn from(p: Point) -> Self {
        Self {
            x: p.x as f64,
            y: p.y as f64,
        }
    }
}

/// A connected set of edge pixels in discovery order.
///
/// Order carries no geometric meaning beyond "the order the extraction walk
/// reached them".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Contour {
    points: Vec<Point>,
}

impl Contour {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The first point reached by the extraction walk, if any.
    pub fn seed(&self) -> Option<Point> {
        self.points.first().copied()
    }
}

impl From<Vec<Point>> for Contour {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

/// Axis-aligned extent of a point set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl BoundingBox {
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn area(&self) -> f64 {
        self.width() * self.height()
    }
}

/// Four corners of a fitted (possibly rotated) rectangle.
///
/// Corner order is whatever the fitter produced unless the detector was
/// configured to normalise it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quadrilateral {
    pub corners: [PointF; 4],
}

impl Quadrilateral {
    pub fn new(corners: [PointF; 4]) -> Self {
        Self { corners }
    }

    /// Polygon area by the shoelace formula (corners taken in stored order).
    pub fn area(&self) -> f64 {
        let mut twice = 0.0;
        for i in 0..4 {
            let a = self.corners[i];
            let b = self.corners[(i + 1) % 4];
            twice += a.x * b.y - b.x * a.y;
        }
        twice.abs() / 2.0
    }

    /// Mean of the four corners.
    pub fn centroid(&self) -> PointF {
        let (sx, sy) = self
            .corners
            .iter()
            .fold((0.0, 0.0), |(sx, sy), c| (sx + c.x, sy + c.y));
        PointF::new(sx / 4.0, sy / 4.0)
    }

    pub fn bounding_box(&self) -> BoundingBox {
        self.corners.iter().skip(1).fold(
            BoundingBox {
                min_x: self.corners[0].x,
                min_y: self.corners[0].y,
                max_x: self.corners[0].x,
                max_y: self.corners[0].y,
            },
            |b, c| BoundingBox {
                min_x: b.min_x.min(c.x),
                min_y: b.min_y.min(c.y),
                max_x: b.max_x.max(c.x),
                max_y: b.max_y.max(c.y),
            },
        )
    }

    /// Corners as `[x, y]` pairs.
    pub fn to_coordinates(&self) -> [[f64; 2]; 4] {
        self.corners.map(|c| [c.x, c.y])
    }
}

/// Transport shape for one detected rectangle: `{ "id": n, "coordinates": [[x, y]; 4] }`.
///
/// `id` is the zero-based position in the detection result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RectangleRecord {
    pub id: usize,
    pub coordinates: [[f64; 2]; 4],
}

// -- Tests --------------------------------------------------------------------
