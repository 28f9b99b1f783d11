//! Short-edge (width) measurement from a detected corner.
//!
//! Two cursors leave the corner in opposite directions and follow the ink
//! boundary until each runs out of admissible neighbors. The segment joining
//! their final positions is the rectangle's short edge: the corner sits at
//! one end of the width on an axis-aligned runway (one cursor stalls in
//! place) and between the two cursor ends on a tilted one.

use crate::geom::{PixelPoint, Slope};
use crate::grid::PixelGrid;

/// Measured short edge of a runway rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct WidthSegment {
    /// End reached by the leftward cursor.
    pub(crate) left: PixelPoint,
    /// End reached by the rightward cursor.
    pub(crate) right: PixelPoint,
}

impl WidthSegment {
    pub(crate) fn midpoint(&self) -> PixelPoint {
        self.left.midpoint(self.right)
    }

    pub(crate) fn direction(&self) -> Slope {
        Slope::between(self.left, self.right)
    }

    pub(crate) fn length(&self) -> f64 {
        self.left.distance(self.right)
    }
}

/// One boundary-following cursor.
///
/// Preference order per step: lateral, then diagonal-down, then straight
/// down. A straight-down step is never taken twice in a row: two consecutive
/// vertical steps mean the cursor has left the short edge and is falling
/// down the runway's long side, which is exactly the width/length confusion
/// this trace must avoid.
struct EdgeCursor {
    pos: PixelPoint,
    prev: PixelPoint,
    dir: i32,
    last_was_below: bool,
    stalled: bool,
}

impl EdgeCursor {
    fn new(corner: PixelPoint, dir: i32) -> Self {
        Self {
            pos: corner,
            prev: corner,
            dir,
            last_was_below: false,
            stalled: false,
        }
    }

    fn advance(&mut self, grid: &PixelGrid) {
        let lateral = self.pos.offset(self.dir, 0);
        let diagonal = self.pos.offset(self.dir, 1);
        let below = self.pos.offset(0, 1);

        let (next, was_below) = if grid.is_ink_at(lateral) {
            (lateral, false)
        } else if grid.is_ink_at(diagonal) {
            (diagonal, false)
        } else if !self.last_was_below && grid.is_ink_at(below) {
            (below, true)
        } else {
            self.stalled = true;
            return;
        };

        self.prev = self.pos;
        self.pos = next;
        self.last_was_below = was_below;
    }

    /// Final measured endpoint. A trailing straight-down step overshot the
    /// short-edge corner onto the long edge; rewind it.
    fn endpoint(&self) -> PixelPoint {
        if self.last_was_below {
            self.prev
        } else {
            self.pos
        }
    }
}

/// Walk both cursors to their stalls and return the measured short edge.
///
/// Returns `None` for degenerate segments (both cursors stalled in place)
/// and when the step budget runs out before both cursors stall.
pub(crate) fn trace_width(
    grid: &PixelGrid,
    corner: PixelPoint,
    max_steps: usize,
) -> Option<WidthSegment> {
    let mut left = EdgeCursor::new(corner, -1);
    let mut right = EdgeCursor::new(corner, 1);

    for _ in 0..max_steps {
        if left.stalled && right.stalled {
            break;
        }
        if !left.stalled {
            left.advance(grid);
        }
        if !right.stalled {
            right.advance(grid);
        }
    }
    if !(left.stalled && right.stalled) {
        tracing::trace!(
            "width trace from ({}, {}) exhausted its step budget",
            corner.x,
            corner.y
        );
        return None;
    }

    let segment = WidthSegment {
        left: left.endpoint(),
        right: right.endpoint(),
    };
    (segment.left != segment.right).then_some(segment)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::rect_grid;

    const MAX_STEPS: usize = 10_000;

    #[test]
    fn axis_aligned_top_edge_is_the_width() {
        // 21x200 vertical runway; the corner is the top-left pixel.
        let grid = rect_grid(200, 400, 50, 100, 21, 200);
        let seg = trace_width(&grid, PixelPoint::new(50, 100), MAX_STEPS).unwrap();
        assert_eq!(seg.left, PixelPoint::new(50, 100));
        assert_eq!(seg.right, PixelPoint::new(70, 100));
        assert!((seg.length() - 20.0).abs() < 1e-12);
        assert_eq!(seg.direction(), Slope { dx: 20, dy: 0 });
    }

    #[test]
    fn trailing_below_step_is_rewound() {
        // Horizontal bar with a vertical tail hanging from its left end; the
        // leftward cursor drops one pixel into the tail and must give it back.
        let grid = PixelGrid::from_fn(40, 40, |x, y| {
            (y == 5 && (10..=20).contains(&x)) || (x == 10 && (5..=15).contains(&y))
        });
        let seg = trace_width(&grid, PixelPoint::new(10, 5), MAX_STEPS).unwrap();
        assert_eq!(seg.left, PixelPoint::new(10, 5));
        assert_eq!(seg.right, PixelPoint::new(20, 5));
    }

    #[test]
    fn diagonal_short_edge_is_followed() {
        // A 2 px thick 45-degree stripe descending to the left of (50, 10).
        let grid = PixelGrid::from_fn(80, 40, |x, y| {
            (10..=18).contains(&y) && (x + y == 60 || x + y == 61)
        });
        let seg = trace_width(&grid, PixelPoint::new(50, 10), MAX_STEPS).unwrap();
        assert_eq!(seg.left, PixelPoint::new(42, 18));
        assert_eq!(seg.right, PixelPoint::new(51, 10));
    }

    #[test]
    fn isolated_pixel_has_no_width() {
        let grid = PixelGrid::from_fn(10, 10, |x, y| x == 5 && y == 5);
        assert!(trace_width(&grid, PixelPoint::new(5, 5), MAX_STEPS).is_none());
    }
}
