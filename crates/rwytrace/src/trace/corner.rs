//! Rectangle-corner signature test.

use crate::geom::PixelPoint;
use crate::grid::PixelGrid;

/// True when `p` carries the top-corner signature of a runway rectangle.
///
/// The raster scan approaches from above/left, so a top corner is a "first"
/// ink pixel: none of its upper-left, upper, upper-right, or left neighbors
/// may be ink. To reject stray pixels and thin diagonal strokes, the region
/// must also widen below/right: at least 3 of the lower-left, lower,
/// lower-right, and right neighbors must be ink.
pub(crate) fn is_top_corner(grid: &PixelGrid, p: PixelPoint) -> bool {
    let PixelPoint { x, y } = p;

    if grid.is_ink(x - 1, y)
        || grid.is_ink(x - 1, y - 1)
        || grid.is_ink(x, y - 1)
        || grid.is_ink(x + 1, y - 1)
    {
        return false;
    }

    let below_and_right = [(x - 1, y + 1), (x, y + 1), (x + 1, y + 1), (x + 1, y)];
    let ink_neighbors = below_and_right
        .iter()
        .filter(|&&(nx, ny)| grid.is_ink(nx, ny))
        .count();
    ink_neighbors >= 3
}
