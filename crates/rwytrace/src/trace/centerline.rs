//! Wing-guided centerline trace along the runway's long axis.
//!
//! The cursor advances by the gcd-reduced slope one minimal step at a time.
//! Surface markings (numbers, touchdown stripes) break the ink run along the
//! center, so each step also inspects two wing points offset perpendicular
//! to the direction of travel: as long as a wing is still in ink the cursor
//! is on the runway body and may push through the gap, re-centering itself
//! toward whichever wing still holds.

use crate::geom::{PixelPoint, Slope};
use crate::grid::PixelGrid;

/// Outcome of a single centerline step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum TraceState {
    /// Next point and both wings are on the runway body.
    Advancing,
    /// Only the left wing held ink; the cursor is nudged toward it.
    CorrectingLeft,
    /// Only the right wing held ink; the cursor is nudged toward it.
    CorrectingRight,
    /// Neither wing held ink: end of the runway.
    Stopped,
}

/// Pure single-step function of the trace state machine.
///
/// `advance` must be a gcd-reduced slope and `wing` its reduced
/// perpendicular. Returns the new state and cursor; a [`TraceState::Stopped`]
/// result leaves the cursor at its last accepted position.
pub(crate) fn step_trace(
    grid: &PixelGrid,
    cursor: PixelPoint,
    advance: Slope,
    wing: Slope,
    nudge_px: i32,
) -> (TraceState, PixelPoint) {
    let next = cursor.offset(advance.dx, advance.dy);
    let left_wing = next.offset(wing.dx, wing.dy);
    let right_wing = next.offset(-wing.dx, -wing.dy);

    let next_ink = grid.is_ink_at(next);
    let left_ink = grid.is_ink_at(left_wing);
    let right_ink = grid.is_ink_at(right_wing);

    // The wing sub-cases apply identically whether the next point itself is
    // ink or a gap in the surface paint; only the no-wing case distinguishes
    // the two, and both read as end-of-runway.
    match (next_ink, left_ink, right_ink) {
        (_, true, true) => (TraceState::Advancing, next),
        (_, true, false) => (
            TraceState::CorrectingLeft,
            next.offset(wing.dx * nudge_px, wing.dy * nudge_px),
        ),
        (_, false, true) => (
            TraceState::CorrectingRight,
            next.offset(-wing.dx * nudge_px, -wing.dy * nudge_px),
        ),
        (_, false, false) => (TraceState::Stopped, cursor),
    }
}

/// Drive the step function from `start` until it stops or exhausts the step
/// budget; returns the last accepted cursor position.
pub(crate) fn trace_centerline(
    grid: &PixelGrid,
    start: PixelPoint,
    advance: Slope,
    wing: Slope,
    nudge_px: i32,
    max_steps: usize,
) -> PixelPoint {
    let mut cursor = start;
    for _ in 0..max_steps {
        let (state, next_cursor) = step_trace(grid, cursor, advance, wing, nudge_px);
        if state == TraceState::Stopped {
            return cursor;
        }
        cursor = next_cursor;
    }
    tracing::trace!(
        "centerline trace from ({}, {}) exhausted its step budget",
        start.x,
        start.y
    );
    cursor
}
