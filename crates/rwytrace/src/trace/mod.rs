//! Runway discovery over the pixel grid.
//!
//! The tracer raster-scans a region of interest for ink pixels carrying the
//! rectangle-corner signature, measures each rectangle's short edge with a
//! two-cursor boundary walk, and follows the perpendicular long axis from
//! the short edge's midpoint to the far end of the runway. Stalls and
//! rejected corners are frequent and free; only traces longer than the
//! configured minimum survive as candidates.

mod centerline;
mod corner;
mod dedup;
mod width;

use serde::{Deserialize, Serialize};

use crate::config::DiagramFormatConfig;
use crate::geom::{PixelPoint, Slope};
use crate::grid::PixelGrid;

/// A traced runway centerline in pixel space, before geographic projection.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RunwayCandidate {
    /// Midpoint of the measured short edge (the near threshold).
    pub start: PixelPoint,
    /// Last accepted centerline position (the far threshold).
    pub end: PixelPoint,
    /// Measured short-edge length in pixels.
    pub width_px: f64,
    /// Euclidean centerline length in pixels.
    pub length_px: f64,
    /// Discovery index within the raster scan.
    ///
    /// Candidates traced from disjoint regions merge by this tag, keeping
    /// the discovery-order pairing independent of completion order.
    pub scan_order: usize,
}

impl RunwayCandidate {
    /// Canonical long-axis direction of the centerline.
    pub fn slope(&self) -> Slope {
        Slope::between(self.start, self.end)
    }

    /// Centerline midpoint.
    pub fn midpoint(&self) -> PixelPoint {
        self.start.midpoint(self.end)
    }
}

/// Scan the region from `config.scan_origin` to the bottom-right of the grid
/// and emit every runway candidate found.
///
/// An empty result is legitimate (the diagram's runways may lie outside the
/// region) and is reported as a warning, never an error.
pub fn find_runways(grid: &PixelGrid, config: &DiagramFormatConfig) -> Vec<RunwayCandidate> {
    let mut candidates = Vec::new();
    let mut corners = 0usize;

    for y in config.scan_origin.y.max(0)..grid.height() as i32 {
        for x in config.scan_origin.x.max(0)..grid.width() as i32 {
            if !grid.is_ink(x, y) {
                continue;
            }
            let pixel = PixelPoint::new(x, y);
            if !corner::is_top_corner(grid, pixel) {
                continue;
            }
            corners += 1;
            if let Some(candidate) = trace_candidate(grid, pixel, config, candidates.len()) {
                candidates.push(candidate);
            }
        }
    }

    tracing::info!(
        "{} corner signatures yielded {} candidates before dedup",
        corners,
        candidates.len()
    );
    let kept = dedup::dedup_candidates(candidates, config.dedup_radius_px);
    if kept.is_empty() {
        tracing::warn!(
            "no runway candidates in scan region starting at ({}, {})",
            config.scan_origin.x,
            config.scan_origin.y
        );
    } else {
        tracing::info!("{} runway candidates after dedup", kept.len());
    }
    kept
}

/// Run the width and centerline traces from one confirmed corner.
fn trace_candidate(
    grid: &PixelGrid,
    corner: PixelPoint,
    config: &DiagramFormatConfig,
    scan_order: usize,
) -> Option<RunwayCandidate> {
    let short_edge = width::trace_width(grid, corner, config.max_trace_steps)?;

    // The long axis is perpendicular to the measured width; both the step
    // and the wing offset are reduced to minimal integer vectors.
    let long_axis = short_edge.direction().perpendicular();
    if long_axis.is_zero() {
        return None;
    }
    let advance = long_axis.reduced();
    let wing = advance.perpendicular().reduced();

    let start = short_edge.midpoint();
    let end = centerline::trace_centerline(
        grid,
        start,
        advance,
        wing,
        config.lateral_correction_px,
        config.max_trace_steps,
    );

    let length_px = start.distance(end);
    if length_px > config.min_runway_length_px {
        Some(RunwayCandidate {
            start,
            end,
            width_px: short_edge.length(),
            length_px,
            scan_order,
        })
    } else {
        tracing::trace!(
            "trace at ({}, {}) too short to be a runway ({:.1} px)",
            corner.x,
            corner.y,
            length_px
        );
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::rect_grid;

    fn scan_all_config() -> DiagramFormatConfig {
        DiagramFormatConfig {
            scan_origin: PixelPoint::new(0, 0),
            ..DiagramFormatConfig::default()
        }
    }

    #[test]
    fn vertical_rectangle_yields_one_vertical_candidate() {
        // 21 px wide, 200 px tall block of ink: one runway.
        let grid = rect_grid(300, 400, 50, 100, 21, 200);
        let found = find_runways(&grid, &scan_all_config());
        assert_eq!(found.len(), 1);

        let runway = &found[0];
        assert!((runway.width_px - 20.0).abs() <= 2.0);
        assert!((runway.length_px - 200.0).abs() <= 2.0);
        assert_eq!(runway.start, PixelPoint::new(60, 100));
        assert_eq!(runway.end, PixelPoint::new(60, 299));
        assert_eq!(runway.slope(), Slope { dx: 0, dy: 199 });
    }

    #[test]
    fn length_threshold_is_strictly_greater() {
        // Centerline runs from the top edge to the last ink row, so a block
        // of n rows measures n - 1 px. 101 rows: exactly 100 px, excluded.
        let at_threshold = rect_grid(200, 300, 50, 20, 21, 101);
        assert!(find_runways(&at_threshold, &scan_all_config()).is_empty());

        // 102 rows: 101 px, included.
        let above_threshold = rect_grid(200, 300, 50, 20, 21, 102);
        assert_eq!(find_runways(&above_threshold, &scan_all_config()).len(), 1);
    }

    #[test]
    fn scan_region_excludes_runways_above_origin() {
        let grid = rect_grid(300, 400, 50, 100, 21, 200);
        let config = DiagramFormatConfig {
            scan_origin: PixelPoint::new(0, 320),
            ..DiagramFormatConfig::default()
        };
        assert!(find_runways(&grid, &config).is_empty());
    }

    #[test]
    fn tracing_is_idempotent() {
        let grid = rect_grid(300, 400, 50, 100, 21, 200);
        let config = scan_all_config();
        let first = find_runways(&grid, &config);
        let second = find_runways(&grid, &config);
        assert_eq!(first, second);
    }

    #[test]
    fn two_separate_runways_keep_discovery_order() {
        let grid = PixelGrid::from_fn(500, 400, |x, y| {
            let first = (50..=70).contains(&x) && (30..230).contains(&y);
            let second = (300..=320).contains(&x) && (60..260).contains(&y);
            first || second
        });
        let found = find_runways(&grid, &scan_all_config());
        assert_eq!(found.len(), 2);
        assert_eq!(found[0].start, PixelPoint::new(60, 30));
        assert_eq!(found[1].start, PixelPoint::new(310, 60));
        assert!(found[0].scan_order < found[1].scan_order);
    }
}
