//! Heading-keyed assignment of traced candidates to documented runways.
//!
//! Traced geometry and parsed text discover runways in unrelated orders, so
//! candidates are matched to metadata by direction instead of list position:
//! each candidate's compass heading (derived from its centerline slope) is
//! compared axis-wise against the documented headings, and the closest
//! unmatched pair of runway ends within the configured gate wins.

use crate::calibrate::CalibrationParams;
use crate::geo;
use crate::metadata::RunwayMeta;
use crate::model::{AirportModel, Runway};
use crate::trace::RunwayCandidate;

/// Compass heading of the candidate's centerline in degrees `[0, 360)`.
///
/// Screen x grows eastward and screen y grows southward, so north is the
/// negative-y direction. The canonical slope points down the page, which
/// makes the result the heading of the start→end traversal.
pub fn candidate_heading_deg(candidate: &RunwayCandidate) -> f32 {
    let dx = (candidate.end.x - candidate.start.x) as f32;
    let dy = (candidate.end.y - candidate.start.y) as f32;
    let mut heading = dx.atan2(-dy).to_degrees();
    if heading < 0.0 {
        heading += 360.0;
    }
    heading
}

/// Absolute angular difference in degrees, ignoring direction of travel
/// (a runway axis reads the same at 164° and 344°).
fn axis_difference_deg(a: f32, b: f32) -> f32 {
    let mut diff = (a - b).rem_euclid(180.0);
    if diff > 90.0 {
        diff = 180.0 - diff;
    }
    diff
}

/// Plain circular difference in degrees, in `[0, 180]`.
fn circular_difference_deg(a: f32, b: f32) -> f32 {
    let diff = (a - b).rem_euclid(360.0);
    if diff > 180.0 {
        360.0 - diff
    } else {
        diff
    }
}

/// Assign each candidate to the closest unmatched metadata pair and append
/// the paired runway entries to the model.
///
/// Metadata arrives as consecutive reciprocal ends (the listing block prints
/// "RWY 16L-34R" style pairs), so entry `2k` and `2k+1` describe one
/// physical runway. A candidate whose heading matches neither end of any
/// remaining pair within `gate_deg` is dropped with a warning rather than
/// mis-paired; metadata pairs with no surviving geometry are skipped.
pub fn populate_runways(
    model: &mut AirportModel,
    metas: &[RunwayMeta],
    candidates: &[RunwayCandidate],
    calib: &CalibrationParams,
    gate_deg: f32,
) {
    let mut claimed = vec![false; metas.len() / 2];

    for candidate in candidates {
        let heading = candidate_heading_deg(candidate);

        let mut best: Option<(usize, f32)> = None;
        for (pair, taken) in claimed.iter().enumerate() {
            if *taken {
                continue;
            }
            let diff = axis_difference_deg(heading, metas[2 * pair].heading_deg);
            if diff <= gate_deg && best.map_or(true, |(_, d)| diff < d) {
                best = Some((pair, diff));
            }
        }

        let Some((pair, diff)) = best else {
            tracing::warn!(
                "no documented runway within {:.0}° of traced heading {:.1}°; candidate dropped",
                gate_deg,
                heading
            );
            continue;
        };
        claimed[pair] = true;
        tracing::debug!(
            "candidate at heading {:.1}° matched {} / {} ({:.1}° off axis)",
            heading,
            metas[2 * pair].name,
            metas[2 * pair + 1].name,
            diff
        );

        let start_geo = geo::project(candidate.start, calib);
        let end_geo = geo::project(candidate.end, calib);

        // The centerline runs start→end at `heading`; the metadata end whose
        // documented heading points the same way owns that traversal, its
        // reciprocal gets the reverse.
        let (near, far) = (&metas[2 * pair], &metas[2 * pair + 1]);
        let (forward, reverse) =
            if circular_difference_deg(heading, near.heading_deg) <= 90.0 {
                (near, far)
            } else {
                (far, near)
            };

        model.add_runway_pair(
            Runway::new(forward, vec![start_geo, end_geo], Some(start_geo)),
            Runway::new(reverse, vec![end_geo, start_geo], Some(end_geo)),
        );
    }

    for (pair, taken) in claimed.iter().enumerate() {
        if !taken {
            tracing::warn!(
                "documented runway {} / {} had no traced geometry",
                metas[2 * pair].name,
                metas[2 * pair + 1].name
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::PixelPoint;

    fn candidate(start: (i32, i32), end: (i32, i32)) -> RunwayCandidate {
        RunwayCandidate {
            start: PixelPoint::new(start.0, start.1),
            end: PixelPoint::new(end.0, end.1),
            width_px: 20.0,
            length_px: 200.0,
            scan_order: 0,
        }
    }

    fn meta(name: &str, heading_deg: f32) -> RunwayMeta {
        RunwayMeta {
            name: name.to_string(),
            heading_deg,
            elevation_ft: 400,
        }
    }

    fn calib() -> CalibrationParams {
        CalibrationParams {
            pixels_per_degree_lat: 100,
            pixels_per_degree_lon: 100,
            lat_offset_px: 0,
            lon_offset_px: 0,
        }
    }

    #[test]
    fn headings_follow_compass_convention() {
        // Straight down the page is south.
        assert!((candidate_heading_deg(&candidate((60, 100), (60, 300))) - 180.0).abs() < 1e-3);
        // Rightward is east.
        assert!((candidate_heading_deg(&candidate((60, 100), (260, 100))) - 90.0).abs() < 1e-3);
        // Down-left is southwest.
        assert!((candidate_heading_deg(&candidate((200, 100), (100, 200))) - 225.0).abs() < 1e-3);
    }

    #[test]
    fn axis_difference_ignores_reciprocal_direction() {
        assert!(axis_difference_deg(164.3, 344.3) < 1e-3);
        assert!((axis_difference_deg(10.0, 170.0) - 20.0).abs() < 1e-3);
    }

    #[test]
    fn candidate_matches_reciprocal_pair_by_axis() {
        let metas = vec![
            meta("09", 90.0),
            meta("27", 270.0),
            meta("18", 180.0),
            meta("36", 360.0),
        ];
        // A vertical (southbound) centerline: matches the 18/36 pair, with
        // runway 18 owning the forward traversal.
        let mut model = AirportModel::new("test.pdf");
        populate_runways(
            &mut model,
            &metas,
            &[candidate((60, 0), (60, 200))],
            &calib(),
            30.0,
        );

        assert_eq!(model.num_paths(), 2);
        assert_eq!(model.path(0).name(), "18");
        assert_eq!(model.path(1).name(), "36");

        let forward = model.path(0).nodes();
        let reverse = model.path(1).nodes();
        assert_eq!(forward.len(), 2);
        assert_eq!(forward[0], reverse[1]);
        assert_eq!(forward[1], reverse[0]);
        assert!(forward[0].lat < forward[1].lat);
    }

    #[test]
    fn unmatched_candidate_is_dropped() {
        let metas = vec![meta("09", 90.0), meta("27", 270.0)];
        let mut model = AirportModel::new("test.pdf");
        // Southbound candidate vs an east-west runway: 90° off axis.
        populate_runways(
            &mut model,
            &metas,
            &[candidate((60, 0), (60, 200))],
            &calib(),
            30.0,
        );
        assert_eq!(model.num_paths(), 0);
    }

    #[test]
    fn each_pair_is_claimed_once() {
        let metas = vec![meta("18", 180.0), meta("36", 360.0)];
        let mut model = AirportModel::new("test.pdf");
        populate_runways(
            &mut model,
            &metas,
            &[candidate((60, 0), (60, 200)), candidate((400, 0), (400, 200))],
            &calib(),
            30.0,
        );
        // Second southbound candidate finds the pair already claimed.
        assert_eq!(model.num_paths(), 2);
    }
}
