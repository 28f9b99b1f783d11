//! Top-level extraction pipeline: calibrate → trace → project → merge.

use image::GrayImage;

use crate::calibrate::{self, CalibrationError};
use crate::config::DiagramFormatConfig;
use crate::grid::PixelGrid;
use crate::matching;
use crate::metadata::{self, DocumentText};
use crate::model::AirportModel;
use crate::trace;

/// Airport identification fields.
///
/// Parsed from the document's title block by a collaborator outside this
/// crate and carried through to the model unchanged.
#[derive(Debug, Clone, Default)]
pub struct AirportIdentity {
    /// Airport name.
    pub name: String,
    /// City/state line.
    pub location: String,
    /// Airport identifier, e.g. `"ATL"`.
    pub abbreviation: String,
    /// Variation between magnetic and true north in degrees.
    pub magnetic_variation: f32,
}

/// Fatal failure while extracting one document.
///
/// Only calibration aborts a document; every geometric or textual miss is
/// recovered at candidate scope. A batch driver reports this per file and
/// continues with the next input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractError {
    /// The grid ruler could not be located.
    Calibration(CalibrationError),
}

impl std::fmt::Display for ExtractError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Calibration(err) => write!(f, "calibration failed: {err}"),
        }
    }
}

impl std::error::Error for ExtractError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Calibration(err) => Some(err),
        }
    }
}

impl From<CalibrationError> for ExtractError {
    fn from(err: CalibrationError) -> Self {
        Self::Calibration(err)
    }
}

/// Run the full extraction over one decoded diagram.
///
/// Calibration runs first and is the only fatal stage; tracing and text
/// parsing then proceed independently and merge by heading into the model.
pub fn extract_airport(
    file_path: &str,
    image: &GrayImage,
    text: &DocumentText,
    identity: AirportIdentity,
    config: &DiagramFormatConfig,
) -> Result<AirportModel, ExtractError> {
    let grid = PixelGrid::from_image(image, config.ink_threshold);
    extract_airport_from_grid(file_path, &grid, text, identity, config)
}

/// [`extract_airport`] over an already-thresholded grid.
pub fn extract_airport_from_grid(
    file_path: &str,
    grid: &PixelGrid,
    text: &DocumentText,
    identity: AirportIdentity,
    config: &DiagramFormatConfig,
) -> Result<AirportModel, ExtractError> {
    let calib = calibrate::calibrate(grid, config)?;

    let mut model = AirportModel::new(file_path);
    model.set_name(identity.name);
    model.set_location(identity.location);
    model.set_abbreviation(identity.abbreviation);
    model.set_magnetic_variation(identity.magnetic_variation);
    model.set_calibration(calib);

    let candidates = trace::find_runways(grid, config);
    let metas = metadata::parse_runway_metadata(text);
    tracing::info!(
        "{} traced candidates, {} documented runway ends",
        candidates.len(),
        metas.len()
    );

    matching::populate_runways(&mut model, &metas, &candidates, &calib, config.heading_gate_deg);
    tracing::info!("model populated with {} path entries", model.num_paths());
    Ok(model)
}
