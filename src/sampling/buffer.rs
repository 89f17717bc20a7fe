//! Read-only pixel access for decoded images

use image::RgbImage;

use crate::color::Color;

/// A decoded RGB image owned by the caller
///
/// The pipeline only reads pixels; it never mutates the buffer.
pub trait PixelBuffer {
    fn width(&self) -> u32;

    fn height(&self) -> u32;

    /// Pixel at column `x`, row `y`. Coordinates must be in bounds.
    fn pixel(&self, x: u32, y: u32) -> Color;

    /// Copy `rows` full-width rows starting at `y` into a fresh row-major buffer
    fn crop_rows(&self, y: u32, rows: u32) -> Vec<Color> {
        let width = self.width();
        let end = y.saturating_add(rows).min(self.height());
        let mut pixels = Vec::with_capacity(width as usize * end.saturating_sub(y) as usize);
        for row in y..end {
            for col in 0..width {
                pixels.push(self.pixel(col, row));
            }
        }
        pixels
    }
}

impl PixelBuffer for RgbImage {
    fn width(&self) -> u32 {
        self.dimensions().0
    }

    fn height(&self) -> u32 {
        self.dimensions().1
    }

    fn pixel(&self, x: u32, y: u32) -> Color {
        Color::from(self.get_pixel(x, y).0)
    }

    fn crop_rows(&self, y: u32, rows: u32) -> Vec<Color> {
        let (width, height) = self.dimensions();
        let end = y.saturating_add(rows).min(height);
        if y >= end {
            return Vec::new();
        }

        let row_bytes = width as usize * 3;
        self.as_raw()[y as usize * row_bytes..end as usize * row_bytes]
            .chunks_exact(3)
            .map(|rgb| Color::new(rgb[0], rgb[1], rgb[2]))
            .collect()
    }
}
