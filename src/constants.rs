//! Palette derivation constants and reference values
//!
//! Compile-time defaults for the adjustment chain and region sampling.
//! [`crate::config::PipelineConfig`] starts from these values.

/// WCAG 2.1 contrast against a white background
pub mod contrast {
    /// Minimum contrast ratio against white (WCAG AA for large text / UI)
    pub const TARGET_RATIO: f64 = 3.0;

    /// Offset added to both luminances in the contrast ratio
    pub const LUMINANCE_OFFSET: f64 = 0.05;

    /// Relative luminance of white
    pub const WHITE_LUMINANCE: f64 = 1.0;

    /// Linear segment threshold of the sRGB transfer function
    pub const LINEAR_THRESHOLD: f64 = 0.03928;

    /// Rec. 709 luminance weights (R, G, B)
    pub const LUMINANCE_WEIGHTS: [f64; 3] = [0.2126, 0.7152, 0.0722];

    /// Lightness decrement per iteration while chasing the target ratio
    pub const LIGHTNESS_STEP: f64 = 5.0;

    /// Lightness never goes below this value during contrast normalization
    pub const LIGHTNESS_FLOOR: f64 = 5.0;

    /// Accepted range of the lightness decrement
    pub const MIN_LIGHTNESS_STEP: f64 = 1.0;
    pub const MAX_LIGHTNESS_STEP: f64 = 100.0;

    /// Full HSL lightness scale
    pub const LIGHTNESS_SPAN: f64 = 100.0;
}

/// Lightness/saturation remap parameters
pub mod remap {
    /// Neutral colors: L' = 0.8 * L, capped at 80
    pub const NEUTRAL_LIGHTNESS_SCALE: f64 = 0.8;
    pub const NEUTRAL_LIGHTNESS_MAX: f64 = 80.0;

    /// Neutral colors: S' = 0.9 * S, capped at 90
    pub const NEUTRAL_SATURATION_SCALE: f64 = 0.9;
    pub const NEUTRAL_SATURATION_MAX: f64 = 90.0;

    /// Chromatic colors: L' = 20 + 0.6 * L in [20, 80]
    pub const CHROMATIC_LIGHTNESS_BASE: f64 = 20.0;
    pub const CHROMATIC_LIGHTNESS_SCALE: f64 = 0.6;
    pub const CHROMATIC_LIGHTNESS_MAX: f64 = 80.0;

    /// Chromatic colors: S' = 30 + 0.6 * S in [30, 90]
    pub const CHROMATIC_SATURATION_BASE: f64 = 30.0;
    pub const CHROMATIC_SATURATION_SCALE: f64 = 0.6;
    pub const CHROMATIC_SATURATION_MAX: f64 = 90.0;

    /// Source colors lighter than this keep their own saturation
    pub const PRESERVE_SATURATION_ABOVE: f64 = 59.0;
}

/// Dark variant derivation
pub mod dark {
    /// Hue rotation in degrees
    pub const HUE_SHIFT: f64 = 10.0;

    /// Saturation multiplier
    pub const SATURATION_SCALE: f64 = 0.9;

    /// Lightness decrement (floored at 0)
    pub const LIGHTNESS_DROP: f64 = 15.0;
}

/// Fixed sampling regions as (label, start, end) fractions of image height
pub mod regions {
    pub const FULL: (&str, f64, f64) = ("Primary", 0.0, 1.0);
    pub const TOP: (&str, f64, f64) = ("Header", 0.0, 0.2);
    pub const BOTTOM: (&str, f64, f64) = ("Footer", 0.8, 1.0);
}

/// Input validation limits
pub mod validation {
    /// Images shorter than this cannot be split into regions
    pub const MIN_IMAGE_HEIGHT: u32 = 5;
}

/// Palette extractor defaults
pub mod extraction {
    /// Candidate colors requested from the extractor per region
    pub const MAX_COLORS: usize = 3;

    /// Bits dropped per channel when bucketing colors
    pub const HISTOGRAM_SHIFT: u8 = 3;

    /// Pixels with every channel above this are treated as background white
    pub const WHITE_CUTOFF: u8 = 250;
}
