//! Color science for palette derivation
//!
//! This module handles RGB/HSL conversion, WCAG contrast against white,
//! and the adjustment chain that turns a dominant color into a brand swatch.

pub mod adjust;
pub mod contrast;
pub mod conversion;

pub use adjust::{PaletteAdjuster, Swatches, Tone};
pub use contrast::{contrast_ratio_to_white, relative_luminance};
pub use conversion::{hsl_to_rgb, rgb_to_hsl, to_hex, Color, Hsl};
