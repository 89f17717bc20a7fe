//! # Region Palette
//!
//! A Rust crate for deriving accessible brand palettes from images.
//!
//! For three vertical regions of an image (the whole image, the top 20%
//! and the bottom 20%) this library:
//! - Extracts a dominant color, falling back to the band's top-left pixel
//! - Darkens it until it reaches 3:1 contrast against white
//! - Remaps lightness and saturation into a brand-friendly range
//! - Derives a darker, hue-shifted variant
//!
//! ## Example
//!
//! ```rust,no_run
//! use region_palette::{extract_palettes, image_loader::load_image};
//! use std::path::Path;
//!
//! let image = load_image(Path::new("photo.jpg"))?;
//! for palette in extract_palettes(&image)? {
//!     println!("{}: {} {} {}", palette.label, palette.original, palette.adjusted, palette.dark);
//! }
//! # Ok::<(), region_palette::PaletteError>(())
//! ```

use serde::{Deserialize, Serialize};

pub mod color;
pub mod config;
pub mod constants;
pub mod error;
pub mod image_loader;
pub mod pipeline;
pub mod sampling;

pub use color::{Color, Hsl, PaletteAdjuster, Swatches};
pub use config::{AdjustmentConfig, PipelineConfig, RegionConfig};
pub use error::{PaletteError, Result};
pub use pipeline::PaletteGenerator;
pub use sampling::{HistogramExtractor, PaletteExtractor, PixelBuffer, Region, RegionSampler};

/// Palette derived for one labelled region
///
/// Colors serialize as uppercase `#RRGGBB` strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaletteResult {
    /// Region tag, e.g. `Primary`, `Header`, `Footer`
    pub label: String,
    /// Dominant color as sampled
    pub original: Color,
    /// Contrast-normalized, remapped brand color
    pub adjusted: Color,
    /// Darker, hue-shifted variant of `adjusted`
    pub dark: Color,
}

impl PaletteResult {
    pub fn new(label: impl Into<String>, swatches: Swatches) -> Self {
        Self {
            label: label.into(),
            original: swatches.original,
            adjusted: swatches.adjusted,
            dark: swatches.dark,
        }
    }

    /// `[original, adjusted, dark]` as hex strings
    pub fn hex_triple(&self) -> [String; 3] {
        [self.original.to_hex(), self.adjusted.to_hex(), self.dark.to_hex()]
    }
}

/// Extract palettes for the whole image, top band and bottom band
///
/// Uses the default configuration and [`HistogramExtractor`].
///
/// # Errors
///
/// Returns `PaletteError::ImageTooSmall` if the image is shorter than
/// 5 px or has no columns.
pub fn extract_palettes<B>(image: &B) -> Result<Vec<PaletteResult>>
where
    B: PixelBuffer + Sync + ?Sized,
{
    PaletteGenerator::new().generate(image)
}
