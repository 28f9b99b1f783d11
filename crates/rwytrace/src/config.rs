//! Diagram-format configuration.
//!
//! FAA airport diagrams share a fixed page layout: margin widths, the
//! position of the grid ruler, and the scale of drawn runways are document
//! conventions, not measured properties. All of those constants live here so
//! a new diagram format is a config change, not a code change.

use serde::{Deserialize, Serialize};

use crate::geom::PixelPoint;

/// Layout constants and tracing tolerances for one diagram format.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DiagramFormatConfig {
    /// Margin of the page's long side in pixels.
    ///
    /// The x margin in landscape orientation, the y margin in portrait.
    pub long_side_margin_px: i32,
    /// Margin of the page's short side in pixels.
    pub short_side_margin_px: i32,
    /// Top-left corner of the runway scan region.
    ///
    /// There is deliberately no full-image default: the area above/left of
    /// this origin holds the title block and ruler, and scanning it produces
    /// spurious corners. Callers pick the region per diagram format.
    pub scan_origin: PixelPoint,
    /// Minimum centerline length for a trace to count as a runway.
    ///
    /// Strictly-greater comparison: a trace of exactly this length is
    /// discarded.
    pub min_runway_length_px: f64,
    /// Lateral nudge applied when exactly one wing leaves the ink during a
    /// centerline trace.
    pub lateral_correction_px: i32,
    /// Luminance below which a pixel counts as ink.
    pub ink_threshold: u8,
    /// Upper bound on steps for any single cursor walk.
    ///
    /// The trace loops otherwise terminate only by running out of ink;
    /// a malformed raster must not be able to stall the pipeline.
    pub max_trace_steps: usize,
    /// Candidates whose centerline midpoints are closer than this are
    /// duplicates of one runway; the longest is kept.
    pub dedup_radius_px: f64,
    /// Maximum angular distance (degrees, axis-wise mod 180) between a traced
    /// centerline and a documented runway heading for the two to be matched.
    pub heading_gate_deg: f32,
}

impl DiagramFormatConfig {
    /// Margins as `(x_margin, y_margin)` for a raster of the given size.
    ///
    /// Width greater than height means landscape, which puts the long-side
    /// margin on the x axis; portrait swaps them.
    pub fn margins(&self, width: u32, height: u32) -> (i32, i32) {
        if width > height {
            (self.long_side_margin_px, self.short_side_margin_px)
        } else {
            (self.short_side_margin_px, self.long_side_margin_px)
        }
    }
}

impl Default for DiagramFormatConfig {
    fn default() -> Self {
        Self {
            long_side_margin_px: 61,
            short_side_margin_px: 25,
            scan_origin: PixelPoint::new(85, 361),
            min_runway_length_px: 100.0,
            lateral_correction_px: 2,
            ink_threshold: 128,
            max_trace_steps: 20_000,
            dedup_radius_px: 12.0,
            heading_gate_deg: 30.0,
        }
    }
}
