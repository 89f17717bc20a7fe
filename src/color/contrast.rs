//! WCAG 2.1 relative luminance and contrast against white

use crate::color::Color;
use crate::constants::contrast::{
    LINEAR_THRESHOLD, LUMINANCE_OFFSET, LUMINANCE_WEIGHTS, WHITE_LUMINANCE,
};

/// Relative luminance of an sRGB color in [0, 1]
pub fn relative_luminance(color: Color) -> f64 {
    let [wr, wg, wb] = LUMINANCE_WEIGHTS;
    wr * linearize(color.r) + wg * linearize(color.g) + wb * linearize(color.b)
}

/// Contrast ratio of a color against a white background, in [1, 21]
pub fn contrast_ratio_to_white(color: Color) -> f64 {
    (WHITE_LUMINANCE + LUMINANCE_OFFSET) / (relative_luminance(color) + LUMINANCE_OFFSET)
}

fn linearize(channel: u8) -> f64 {
    let c = f64::from(channel) / 255.0;
    if c <= LINEAR_THRESHOLD {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}
