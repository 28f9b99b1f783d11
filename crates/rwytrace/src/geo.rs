//! Pixel-to-degree projection.
//!
//! A pure conversion between raster coordinates and degree deltas relative
//! to the diagram's grid origin. Sign conventions and the absolute reference
//! geo-point are applied by the downstream aggregation stage; this module
//! only supplies the scale mapping.

use serde::{Deserialize, Serialize};

use crate::calibrate::CalibrationParams;
use crate::geom::PixelPoint;

/// A geographic coordinate pair in degrees.
///
/// Always the result of projecting a [`PixelPoint`]; never carries identity
/// of its own.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees.
    pub lat: f64,
    /// Longitude in degrees.
    pub lon: f64,
}

/// Project a pixel point into degree space.
///
/// Division by zero is impossible: the calibration invariant keeps both
/// per-degree factors strictly positive.
pub fn project(p: PixelPoint, calib: &CalibrationParams) -> GeoPoint {
    GeoPoint {
        lat: (p.y - calib.lat_offset_px) as f64 / calib.pixels_per_degree_lat as f64,
        lon: (p.x - calib.lon_offset_px) as f64 / calib.pixels_per_degree_lon as f64,
    }
}

/// Inverse of [`project`], rounding to the nearest pixel.
pub fn unproject(g: GeoPoint, calib: &CalibrationParams) -> PixelPoint {
    PixelPoint {
        x: (g.lon * calib.pixels_per_degree_lon as f64).round() as i32 + calib.lon_offset_px,
        y: (g.lat * calib.pixels_per_degree_lat as f64).round() as i32 + calib.lat_offset_px,
    }
}
