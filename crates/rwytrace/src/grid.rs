//! Read-only boolean raster view over a decoded diagram image.

use image::GrayImage;

use crate::geom::PixelPoint;

/// Immutable width×height ink matrix.
///
/// All geometry stages query the diagram through this view. Coordinates
/// outside `[0, width) × [0, height)` are treated as "not ink" rather than
/// an error so that neighbor scans never need bounds bookkeeping.
pub struct PixelGrid {
    width: u32,
    height: u32,
    ink: Vec<bool>,
}

impl PixelGrid {
    /// Threshold a grayscale raster into an ink matrix.
    ///
    /// A pixel is ink when its luminance is strictly below `ink_threshold`
    /// (printed diagram content is dark on a light background).
    pub fn from_image(image: &GrayImage, ink_threshold: u8) -> Self {
        let (width, height) = image.dimensions();
        let ink = image.as_raw().iter().map(|&l| l < ink_threshold).collect();
        Self { width, height, ink }
    }

    /// Build a grid from a per-pixel predicate. Intended for synthetic
    /// diagrams in tests.
    pub fn from_fn(width: u32, height: u32, mut is_ink: impl FnMut(u32, u32) -> bool) -> Self {
        let mut ink = Vec::with_capacity(width as usize * height as usize);
        for y in 0..height {
            for x in 0..width {
                ink.push(is_ink(x, y));
            }
        }
        Self { width, height, ink }
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Ink test with out-of-bounds coordinates reading as background.
    pub fn is_ink(&self, x: i32, y: i32) -> bool {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return false;
        }
        self.ink[y as usize * self.width as usize + x as usize]
    }

    /// [`is_ink`](Self::is_ink) for a [`PixelPoint`].
    pub fn is_ink_at(&self, p: PixelPoint) -> bool {
        self.is_ink(p.x, p.y)
    }
}
