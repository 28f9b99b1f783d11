//! The in-memory airport aggregate handed to the serialization stage.

use serde::{Deserialize, Serialize};

use crate::calibrate::CalibrationParams;
use crate::geo::GeoPoint;
use crate::metadata::RunwayMeta;

/// A named sequence of geographic nodes.
///
/// The shared supertype of runways and taxiways; taxiway extraction lives
/// outside this crate but appends through the same surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Path {
    /// Display name, e.g. `"16L"` or `"A3"`.
    pub name: String,
    /// Ordered node sequence along the path.
    pub nodes: Vec<GeoPoint>,
}

/// One runway end with its documented metadata and traced geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Runway {
    /// Name and node sequence.
    pub path: Path,
    /// Documented threshold elevation in feet.
    pub elevation_ft: i32,
    /// Documented magnetic heading in degrees.
    pub heading_deg: f32,
    /// Threshold node, when geometry was traced for this end.
    pub threshold: Option<GeoPoint>,
}

impl Runway {
    /// Build a runway entry from its documented metadata and traced nodes.
    pub fn new(meta: &RunwayMeta, nodes: Vec<GeoPoint>, threshold: Option<GeoPoint>) -> Self {
        Self {
            path: Path {
                name: meta.name.clone(),
                nodes,
            },
            elevation_ft: meta.elevation_ft,
            heading_deg: meta.heading_deg,
            threshold,
        }
    }
}

/// A path entry in the airport's ordered collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PathEntity {
    /// A runway end.
    Runway(Runway),
    /// A taxiway or other generic path.
    Taxiway(Path),
}

impl PathEntity {
    /// The entry's display name.
    pub fn name(&self) -> &str {
        match self {
            Self::Runway(runway) => &runway.path.name,
            Self::Taxiway(path) => &path.name,
        }
    }

    /// The entry's ordered node sequence.
    pub fn nodes(&self) -> &[GeoPoint] {
        match self {
            Self::Runway(runway) => &runway.path.nodes,
            Self::Taxiway(path) => &path.nodes,
        }
    }
}

/// Everything extracted from one airport diagram.
///
/// Constructed once per input file; calibration is stored before any paths
/// are appended, and the populated model is read out by the (external)
/// serializer through the accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AirportModel {
    file_path: String,
    name: String,
    location: String,
    abbreviation: String,
    magnetic_variation: f32,
    calibration: Option<CalibrationParams>,
    paths: Vec<PathEntity>,
}

impl AirportModel {
    /// Create an empty model for the given source file.
    pub fn new(file_path: impl Into<String>) -> Self {
        Self {
            file_path: file_path.into(),
            name: String::new(),
            location: String::new(),
            abbreviation: String::new(),
            magnetic_variation: 0.0,
            calibration: None,
            paths: Vec::new(),
        }
    }

    /// Source file path of the diagram.
    pub fn file_path(&self) -> &str {
        &self.file_path
    }

    /// Airport name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Set the airport name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Airport location (city/state line).
    pub fn location(&self) -> &str {
        &self.location
    }

    /// Set the airport location.
    pub fn set_location(&mut self, location: impl Into<String>) {
        self.location = location.into();
    }

    /// Airport identifier, e.g. `"ATL"`.
    pub fn abbreviation(&self) -> &str {
        &self.abbreviation
    }

    /// Set the airport identifier.
    pub fn set_abbreviation(&mut self, abbreviation: impl Into<String>) {
        self.abbreviation = abbreviation.into();
    }

    /// Variation between magnetic and true north in degrees.
    pub fn magnetic_variation(&self) -> f32 {
        self.magnetic_variation
    }

    /// Set the magnetic variation.
    pub fn set_magnetic_variation(&mut self, variation: f32) {
        self.magnetic_variation = variation;
    }

    /// Pixel-to-degree calibration, once derived.
    pub fn calibration(&self) -> Option<&CalibrationParams> {
        self.calibration.as_ref()
    }

    /// Store the derived calibration.
    pub fn set_calibration(&mut self, calibration: CalibrationParams) {
        self.calibration = Some(calibration);
    }

    /// Number of path entries.
    pub fn num_paths(&self) -> usize {
        self.paths.len()
    }

    /// Path entry at `index`.
    ///
    /// # Panics
    /// Panics when `index` is out of range, like any slice index.
    pub fn path(&self, index: usize) -> &PathEntity {
        &self.paths[index]
    }

    /// All path entries in insertion order.
    pub fn paths(&self) -> &[PathEntity] {
        &self.paths
    }

    /// Append both ends of one physical runway.
    ///
    /// Two consecutive runway entries always describe the same physical
    /// runway; appending them together is what keeps that invariant.
    pub fn add_runway_pair(&mut self, forward: Runway, reverse: Runway) {
        self.paths.push(PathEntity::Runway(forward));
        self.paths.push(PathEntity::Runway(reverse));
    }

    /// Append a taxiway or other generic path.
    pub fn add_taxiway(&mut self, path: Path) {
        self.paths.push(PathEntity::Taxiway(path));
    }
}
