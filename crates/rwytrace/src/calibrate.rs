//! Pixel-to-degree calibration from the diagram's grid ruler.
//!
//! Airport diagrams print short tick marks at fixed geographic intervals
//! along the page margins. The pixel span between the first and second tick
//! is the per-degree scale, and the leading whitespace before the first tick
//! is the offset that aligns pixel (0,0) with the reference geo-point
//! supplied by the aggregation stage.

use crate::config::DiagramFormatConfig;
use crate::geom::PixelPoint;
use crate::grid::PixelGrid;

// ── Error type ─────────────────────────────────────────────────────────────

/// Calibration failure: the grid ruler was not found on either candidate
/// edge for one of the axes.
///
/// Fatal for the current document only; a batch caller reports it per file
/// and moves on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CalibrationError {
    /// Neither the top nor the bottom edge yielded a longitude scale.
    Longitude,
    /// Neither the left nor the right edge yielded a latitude scale.
    Latitude,
}

impl std::fmt::Display for CalibrationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Longitude => write!(f, "longitude grid ruler not found on top or bottom edge"),
            Self::Latitude => write!(f, "latitude grid ruler not found on left or right edge"),
        }
    }
}

impl std::error::Error for CalibrationError {}

// ── Parameters ─────────────────────────────────────────────────────────────

/// Scale factors and origin offsets mapping pixel coordinates to degrees.
///
/// Invariant: both per-degree values are strictly positive; the constructor
/// path in [`calibrate`] cannot produce anything else.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CalibrationParams {
    /// Pixels spanned by one grid unit of latitude.
    pub pixels_per_degree_lat: i32,
    /// Pixels spanned by one grid unit of longitude.
    pub pixels_per_degree_lon: i32,
    /// Whitespace run before the first latitude tick, in pixels.
    pub lat_offset_px: i32,
    /// Whitespace run before the first longitude tick, in pixels.
    pub lon_offset_px: i32,
}

// ── Ruler scan ─────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum ScanAxis {
    /// Rightward along a row (longitude ruler).
    Horizontal,
    /// Downward along a column (latitude ruler).
    Vertical,
}

#[derive(Debug, Clone, Copy)]
struct RulerScale {
    unit_px: i32,
    offset_px: i32,
}

/// Walk from `start` along `axis`, measuring the leading whitespace run and
/// the span from the first tick to the second.
///
/// `limit` is the coordinate (on the scanned axis) at which the attempt is
/// abandoned; a ruler that has not produced two rising ink transitions by
/// then is not there.
fn scan_ruler(grid: &PixelGrid, start: PixelPoint, limit: i32, axis: ScanAxis) -> Option<RulerScale> {
    let ink = |c: i32| match axis {
        ScanAxis::Horizontal => grid.is_ink(c, start.y),
        ScanAxis::Vertical => grid.is_ink(start.x, c),
    };
    let mut pos = match axis {
        ScanAxis::Horizontal => start.x,
        ScanAxis::Vertical => start.y,
    };

    // Leading non-ink run is the grid offset.
    let mut offset_px = 0;
    while !ink(pos) {
        pos += 1;
        offset_px += 1;
        if pos >= limit {
            return None;
        }
    }

    // The first ink pixel starts the unit marker; count until the next
    // rising (non-ink to ink) transition, which starts the following unit.
    let mut unit_px = 0;
    let mut prev_ink = true;
    loop {
        pos += 1;
        unit_px += 1;
        if pos >= limit {
            return None;
        }
        let now_ink = ink(pos);
        if now_ink && !prev_ink {
            return Some(RulerScale { unit_px, offset_px });
        }
        prev_ink = now_ink;
    }
}

// ── Entry point ────────────────────────────────────────────────────────────

/// Locate both grid rulers and derive [`CalibrationParams`].
///
/// The longitude ruler is searched on the top edge, then the bottom edge;
/// the latitude ruler on the left edge, then the right edge. Each axis must
/// succeed on one of its two edges or the whole document is rejected.
pub fn calibrate(
    grid: &PixelGrid,
    config: &DiagramFormatConfig,
) -> Result<CalibrationParams, CalibrationError> {
    let width = grid.width() as i32;
    let height = grid.height() as i32;
    let (x_margin, y_margin) = config.margins(grid.width(), grid.height());

    let end_width = width - x_margin - 1;
    let end_height = height - y_margin - 1;

    let lon = scan_ruler(
        grid,
        PixelPoint::new(x_margin, y_margin),
        end_width,
        ScanAxis::Horizontal,
    )
    .or_else(|| {
        tracing::debug!("top-edge longitude ruler scan failed, retrying bottom edge");
        scan_ruler(
            grid,
            PixelPoint::new(x_margin, end_height),
            end_width,
            ScanAxis::Horizontal,
        )
    })
    .ok_or(CalibrationError::Longitude)?;

    let lat = scan_ruler(
        grid,
        PixelPoint::new(x_margin, y_margin),
        end_height,
        ScanAxis::Vertical,
    )
    .or_else(|| {
        tracing::debug!("left-edge latitude ruler scan failed, retrying right edge");
        scan_ruler(
            grid,
            PixelPoint::new(end_width, y_margin),
            end_height,
            ScanAxis::Vertical,
        )
    })
    .ok_or(CalibrationError::Latitude)?;

    let params = CalibrationParams {
        pixels_per_degree_lat: lat.unit_px,
        pixels_per_degree_lon: lon.unit_px,
        lat_offset_px: lat.offset_px,
        lon_offset_px: lon.offset_px,
    };
    tracing::debug!(
        "calibrated: {} px/deg lon (offset {}), {} px/deg lat (offset {})",
        params.pixels_per_degree_lon,
        params.lon_offset_px,
        params.pixels_per_degree_lat,
        params.lat_offset_px
    );
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::ruler_grid;

    fn zero_margin_config() -> DiagramFormatConfig {
        DiagramFormatConfig {
            long_side_margin_px: 0,
            short_side_margin_px: 0,
            ..DiagramFormatConfig::default()
        }
    }

    #[test]
    fn two_ticks_yield_scale_and_offset() {
        // 1 px ticks at columns 10 and 40, scan starting from a margin of 5.
        let grid = PixelGrid::from_fn(100, 100, |x, y| {
            (y == 5 || x == 5) && (x == 10 || x == 40 || y == 10 || y == 40)
        });
        let cfg = DiagramFormatConfig {
            long_side_margin_px: 5,
            short_side_margin_px: 5,
            ..DiagramFormatConfig::default()
        };
        let params = calibrate(&grid, &cfg).unwrap();
        assert_eq!(params.pixels_per_degree_lon, 30);
        assert_eq!(params.lon_offset_px, 5);
        assert_eq!(params.pixels_per_degree_lat, 30);
        assert_eq!(params.lat_offset_px, 5);
    }

    #[test]
    fn wide_tick_marks_measure_from_rising_edge() {
        // 3 px wide ticks starting at columns/rows 12 and 48.
        let tick = |c: u32| (12..15).contains(&c) || (48..51).contains(&c);
        let grid = PixelGrid::from_fn(120, 120, move |x, y| (y == 0 && tick(x)) || (x == 0 && tick(y)));
        let params = calibrate(&grid, &zero_margin_config()).unwrap();
        assert_eq!(params.pixels_per_degree_lon, 36);
        assert_eq!(params.lon_offset_px, 12);
    }

    #[test]
    fn falls_back_to_opposite_edge() {
        // Ruler only on the bottom edge and the right edge.
        let grid = ruler_grid(100, 80, &[20, 60], &[15, 55], true);
        let params = calibrate(&grid, &zero_margin_config()).unwrap();
        assert_eq!(params.pixels_per_degree_lon, 40);
        assert_eq!(params.lon_offset_px, 20);
        assert_eq!(params.pixels_per_degree_lat, 40);
        assert_eq!(params.lat_offset_px, 15);
    }

    #[test]
    fn blank_page_is_a_longitude_failure() {
        let grid = PixelGrid::from_fn(100, 100, |_, _| false);
        let err = calibrate(&grid, &zero_margin_config()).unwrap_err();
        assert_eq!(err, CalibrationError::Longitude);
    }

    #[test]
    fn single_tick_fails_the_axis() {
        // Longitude scale resolvable, latitude ruler has only one tick.
        let grid = PixelGrid::from_fn(100, 100, |x, y| (y == 0 && (x == 10 || x == 40)) || (x == 0 && y == 10));
        let err = calibrate(&grid, &zero_margin_config()).unwrap_err();
        assert_eq!(err, CalibrationError::Latitude);
    }
}
