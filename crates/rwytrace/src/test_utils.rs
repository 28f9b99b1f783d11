//! Shared synthetic-diagram builders for unit tests.

use crate::grid::PixelGrid;

/// Solid axis-aligned ink rectangle on a blank page.
pub(crate) fn rect_grid(w: u32, h: u32, x0: u32, y0: u32, rect_w: u32, rect_h: u32) -> PixelGrid {
    PixelGrid::from_fn(w, h, move |x, y| {
        (x0..x0 + rect_w).contains(&x) && (y0..y0 + rect_h).contains(&y)
    })
}

/// Grid-ruler tick marks along one row and one column.
///
/// Ticks sit on the top row and left column, or on the bottom row and right
/// column when `opposite` is set.
pub(crate) fn ruler_grid(
    w: u32,
    h: u32,
    lon_ticks: &[u32],
    lat_ticks: &[u32],
    opposite: bool,
) -> PixelGrid {
    let lon_ticks = lon_ticks.to_vec();
    let lat_ticks = lat_ticks.to_vec();
    let row = if opposite { h - 1 } else { 0 };
    let col = if opposite { w - 1 } else { 0 };
    PixelGrid::from_fn(w, h, move |x, y| {
        (y == row && lon_ticks.contains(&x)) || (x == col && lat_ticks.contains(&y))
    })
}
