// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Rectangle detection pipeline — grayscale, Sobel, contour extraction,
// size filter, fitting, optional corner normalisation.

use rectscan_core::error::Result;
use rectscan_core::{
    Contour, DetectorConfig, EdgeMap, LuminanceBuffer, Quadrilateral, RectangleRecord, RgbaBuffer,
};
use tracing::{debug, info, instrument};

use crate::contours::{discard_small, extract_contours};
use crate::corners::apply_order;
use crate::fit::{RectangleFitter, fitter_for};
use crate::grayscale::{blur, to_luminance};
use crate::report::assemble;
use crate::sobel::sobel;

/// Finds rectangles in RGBA images.
///
/// A detector holds only its configuration and fitter; every call allocates
/// fresh buffers and shares nothing, so one detector can serve many threads.
///
/// ```ignore
/// let detector = RectangleDetector::new(DetectorConfig::default())?;
/// let image = RgbaBuffer::new(width, height, rgba_bytes)?;
/// for quad in detector.detect(&image) {
///     println!("{:?}", quad.corners);
/// }
/// ```
pub struct RectangleDetector {
    config: DetectorConfig,
    fitter: Box<dyn RectangleFitter>,
}

/// Every intermediate product of one detection run.
#[derive(Debug, Clone)]
pub struct DetectionTrace {
    /// Grayscale plane (after the optional blur).
    pub luminance: LuminanceBuffer,
    /// Sobel magnitude plane.
    pub edges: EdgeMap,
    /// All contours in discovery order, before the size filter.
    pub contours: Vec<Contour>,
    /// Contours that survived the size filter.
    pub kept: Vec<Contour>,
    /// One quadrilateral per kept contour that could be fitted.
    pub quadrilaterals: Vec<Quadrilateral>,
}

impl RectangleDetector {
    // -- Construction ---------------------------------------------------------

    /// Validate `config` and build the matching fitter.
    pub fn new(config: DetectorConfig) -> Result<Self> {
        config.validate()?;
        let fitter = fitter_for(&config);
        debug!(fitter = fitter.name(), "Detector configured");
        Ok(Self { config, fitter })
    }

    /// Use a caller-supplied fitter instead of the one named by
    /// `config.fit_policy`.
    pub fn with_fitter(config: DetectorConfig, fitter: Box<dyn RectangleFitter>) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, fitter })
    }

    // -- Accessors ------------------------------------------------------------

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    pub fn fitter(&self) -> &dyn RectangleFitter {
        self.fitter.as_ref()
    }

    // -- Detection ------------------------------------------------------------

    /// Detect rectangles, one quadrilateral per surviving contour, in raster
    /// order of each contour's first pixel.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn detect(&self, image: &RgbaBuffer) -> Vec<Quadrilateral> {
        let edges = self.edge_map(image);
        let contours = extract_contours(&edges, self.config.edge_threshold);
        let kept = discard_small(contours, self.config.min_contour_points);
        let quadrilaterals = self.fit_all(&kept);
        info!(
            width = image.width(),
            height = image.height(),
            rectangles = quadrilaterals.len(),
            "Rectangle detection complete"
        );
        quadrilaterals
    }

    /// Validate a raw RGBA byte slice and detect rectangles in it.
    ///
    /// Fails with `MalformedBuffer` when `data.len() != width * height * 4`;
    /// no partial processing is attempted.
    pub fn detect_raw(&self, width: u32, height: u32, data: &[u8]) -> Result<Vec<Quadrilateral>> {
        let image = RgbaBuffer::new(width, height, data.to_vec())?;
        Ok(self.detect(&image))
    }

    /// Detect and number the results for transport.
    pub fn detect_records(&self, image: &RgbaBuffer) -> Vec<RectangleRecord> {
        assemble(&self.detect(image))
    }

    /// Run the pipeline keeping every intermediate buffer.
    #[instrument(skip(self, image), fields(width = image.width(), height = image.height()))]
    pub fn run_stages(&self, image: &RgbaBuffer) -> DetectionTrace {
        let luminance = self.luminance(image);
        let edges = sobel(&luminance, &self.config.sobel);
        let contours = extract_contours(&edges, self.config.edge_threshold);
        let kept = discard_small(contours.clone(), self.config.min_contour_points);
        let quadrilaterals = self.fit_all(&kept);
        DetectionTrace {
            luminance,
            edges,
            contours,
            kept,
            quadrilaterals,
        }
    }

    // -- Stages ---------------------------------------------------------------

    /// Grayscale plane, blurred when `blur_sigma` is set.
    pub fn luminance(&self, image: &RgbaBuffer) -> LuminanceBuffer {
        let luminance = to_luminance(image);
        match self.config.blur_sigma {
            Some(sigma) => blur(&luminance, sigma),
            None => luminance,
        }
    }

    /// Sobel magnitude of the (optionally blurred) grayscale plane.
    pub fn edge_map(&self, image: &RgbaBuffer) -> EdgeMap {
        sobel(&self.luminance(image), &self.config.sobel)
    }

    /// Fit every contour, applying the configured corner order. Contours the
    /// fitter rejects contribute nothing.
    pub fn fit_all(&self, contours: &[Contour]) -> Vec<Quadrilateral> {
        let quadrilaterals: Vec<Quadrilateral> = contours
            .iter()
            .filter_map(|contour| self.fitter.fit(contour))
            .map(|quad| apply_order(quad, self.config.corner_order))
            .collect();
        debug!(
            fitter = self.fitter.name(),
            contours = contours.len(),
            fitted = quadrilaterals.len(),
            "Contours fitted"
        );
        quadrilaterals
    }
}

impl Default for RectangleDetector {
    fn default() -> Self {
        let config = DetectorConfig::default();
        let fitter = fitter_for(&config);
        Self { config, fitter }
    }
}

/// Detect rectangles with the default configuration.
pub fn detect_rectangles(image: &RgbaBuffer) -> Vec<Quadrilateral> {
    RectangleDetector::default().detect(image)
}

// -- Tests --------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rectscan_core::{CornerOrder, FitPolicy, PointF, RectscanError};

    fn image_with_rect(w: u32, h: u32, x0: u32, y0: u32, x1: u32, y1: u32) -> RgbaBuffer {
        let mut img = RgbaBuffer::from_pixel(w, h, [20, 20, 20, 255]).unwrap();
        for y in y0..y1 {
            for x in x0..x1 {
                img.put_pixel(x, y, [230, 230, 230, 255]);
            }
        }
        img
    }

    #[test]
    fn trace_matches_detect() {
        let img = image_with_rect(80, 60, 10, 10, 50, 40);
        let detector = RectangleDetector::default();
        let trace = detector.run_stages(&img);
        assert_eq!(trace.quadrilaterals, detector.detect(&img));
        assert_eq!(trace.kept.len(), 1);
        assert!(trace.contours.len() >= trace.kept.len());
        assert_eq!(trace.edges.width(), 80);
        assert_eq!(trace.luminance.height(), 60);
    }

    #[test]
    fn detect_raw_rejects_short_buffer() {
        let detector = RectangleDetector::default();
        let err = detector.detect_raw(10, 10, &[0u8; 399]).unwrap_err();
        assert!(matches!(err, RectscanError::MalformedBuffer { .. }));
    }

    #[test]
    fn detect_raw_accepts_exact_buffer() {
        let detector = RectangleDetector::default();
        let quads = detector.detect_raw(10, 10, &[0u8; 400]).unwrap();
        assert!(quads.is_empty());
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = DetectorConfig {
            edge_threshold: f64::NAN,
            ..DetectorConfig::default()
        };
        assert!(matches!(
            RectangleDetector::new(config),
            Err(RectscanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn corner_order_is_applied() {
        let img = image_with_rect(80, 60, 10, 10, 50, 40);
        let config = DetectorConfig {
            corner_order: CornerOrder::ClockwiseFromTopLeft,
            ..DetectorConfig::default()
        };
        let quads = RectangleDetector::new(config).unwrap().detect(&img);
        assert_eq!(quads.len(), 1);
        let [tl, tr, br, bl] = quads[0].corners;
        assert!(tl.x < tr.x && (tl.y - tr.y).abs() < 1e-6);
        assert!(br.y > tr.y && (br.x - tr.x).abs() < 1e-6);
        assert!(bl.x < br.x && (bl.y - br.y).abs() < 1e-6);
    }

    #[test]
    fn low_min_points_lets_fitter_drop_tiny_contours() {
        // Above 500 only the four side neighbours of a lone bright pixel
        // (magnitude 510) are edges, each an isolated one-pixel contour.
        let mut img = RgbaBuffer::from_pixel(9, 9, [0, 0, 0, 255]).unwrap();
        img.put_pixel(4, 4, [255, 255, 255, 255]);
        let config = DetectorConfig {
            min_contour_points: 0,
            edge_threshold: 500.0,
            ..DetectorConfig::default()
        };
        let detector = RectangleDetector::new(config).unwrap();
        let trace = detector.run_stages(&img);
        assert!(trace.kept.iter().all(|c| c.len() < 4));
        assert!(trace.quadrilaterals.is_empty());
    }

    #[test]
    fn blur_option_still_finds_rectangle() {
        let img = image_with_rect(120, 100, 20, 25, 90, 75);
        let config = DetectorConfig {
            blur_sigma: Some(1.0),
            ..DetectorConfig::default()
        };
        let quads = RectangleDetector::new(config).unwrap().detect(&img);
        assert_eq!(quads.len(), 1);
        let bb = quads[0].bounding_box();
        assert!((bb.min_x - 20.0).abs() <= 6.0 && (bb.max_x - 89.0).abs() <= 6.0);
    }

    /// Ignores the contour and reports a fixed, scrambled unit square.
    struct FixedSquare;

    impl RectangleFitter for FixedSquare {
        fn name(&self) -> &'static str {
            "fixed_square"
        }

        fn fit(&self, _contour: &Contour) -> Option<Quadrilateral> {
            Some(Quadrilateral::new([
                PointF::new(1.0, 1.0),
                PointF::new(0.0, 0.0),
                PointF::new(0.0, 1.0),
                PointF::new(1.0, 0.0),
            ]))
        }
    }

    #[test]
    fn custom_fitter_is_used_and_corner_order_still_applies() {
        let img = image_with_rect(80, 60, 10, 10, 50, 40);

        let as_fitted =
            RectangleDetector::with_fitter(DetectorConfig::default(), Box::new(FixedSquare))
                .unwrap();
        assert_eq!(as_fitted.fitter().name(), "fixed_square");
        let quads = as_fitted.detect(&img);
        assert_eq!(quads.len(), 1);
        assert_eq!(
            quads[0].to_coordinates(),
            [[1.0, 1.0], [0.0, 0.0], [0.0, 1.0], [1.0, 0.0]]
        );

        let config = DetectorConfig {
            corner_order: CornerOrder::ClockwiseFromTopLeft,
            ..DetectorConfig::default()
        };
        let ordered = RectangleDetector::with_fitter(config, Box::new(FixedSquare)).unwrap();
        assert_eq!(
            ordered.detect(&img)[0].to_coordinates(),
            [[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0]]
        );
    }

    #[test]
    fn custom_fitter_still_needs_a_valid_config() {
        let config = DetectorConfig {
            blur_sigma: Some(-1.0),
            ..DetectorConfig::default()
        };
        assert!(matches!(
            RectangleDetector::with_fitter(config, Box::new(FixedSquare)),
            Err(RectscanError::InvalidConfig(_))
        ));
    }

    #[test]
    fn brute_force_policy_is_selectable() {
        let config = DetectorConfig {
            fit_policy: FitPolicy::BruteForceQuad,
            ..DetectorConfig::default()
        };
        let detector = RectangleDetector::new(config).unwrap();
        assert_eq!(detector.fitter().name(), "brute_force_quad");
    }
}
