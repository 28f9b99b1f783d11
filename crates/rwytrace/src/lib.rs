//! rwytrace — extract calibrated runway geometry from airport-diagram rasters.
//!
//! Airport diagrams draw runways as solid rectangles over a page with
//! grid-ruler tick marks printed in the margins. The pipeline stages are:
//!
//! 1. **Grid** – threshold the decoded raster into an immutable ink matrix.
//! 2. **Calibrate** – locate the margin rulers and derive the
//!    pixel-to-degree scale factors and origin offsets.
//! 3. **Trace** – raster-scan for rectangle-corner signatures, measure each
//!    rectangle's short edge, and follow the perpendicular centerline to the
//!    far end.
//! 4. **Project** – convert centerline endpoints to geographic coordinates.
//! 5. **Merge** – parse the document text for runway names, headings, and
//!    elevations, and attach the traced geometry by heading.
//!
//! # Public API
//! [`extract_airport`] is the primary entry point. The individual stages
//! ([`calibrate`], [`find_runways`], [`project`], [`parse_runway_metadata`],
//! [`populate_runways`]) are exposed for callers that bring their own
//! orchestration, e.g. tracing several regions of interest.

mod calibrate;
mod config;
mod geo;
mod geom;
mod grid;
mod matching;
mod metadata;
mod model;
mod pipeline;
mod trace;

#[cfg(test)]
pub(crate) mod test_utils;

pub use calibrate::{calibrate, CalibrationError, CalibrationParams};
pub use config::DiagramFormatConfig;
pub use geo::{project, unproject, GeoPoint};
pub use geom::{PixelPoint, Slope};
pub use grid::PixelGrid;
pub use matching::{candidate_heading_deg, populate_runways};
pub use metadata::{correct_runway, parse_runway_metadata, DocumentText, RunwayMeta};
pub use model::{AirportModel, Path, PathEntity, Runway};
pub use pipeline::{extract_airport, extract_airport_from_grid, AirportIdentity, ExtractError};
pub use trace::{find_runways, RunwayCandidate};
