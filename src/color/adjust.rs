//! Three-stage palette adjustment
//!
//! Derives an accessible brand swatch and its dark variant from a raw
//! dominant color:
//! - Stage A: lower lightness until contrast against white reaches the target
//! - Stage B: remap lightness/saturation into a brand-friendly band
//! - Stage C: rotate hue and darken for the dark variant
//!
//! Source colors lighter than the preservation threshold keep their own
//! saturation after stage B.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::color::{contrast_ratio_to_white, hsl_to_rgb, rgb_to_hsl, Color, Hsl};
use crate::config::AdjustmentConfig;
use crate::constants::{contrast, remap};

/// Result of running one color through the adjustment chain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Swatches {
    /// Raw dominant color
    pub original: Color,
    /// Stage A output
    pub contrast: Color,
    /// Stage B output (with the saturation exception applied)
    pub adjusted: Color,
    /// Stage C output
    pub dark: Color,
}

/// Remap branch selected in stage B
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    /// Pure white or zero saturation
    Neutral,
    Chromatic,
}

impl Tone {
    pub fn classify(color: Color, hsl: Hsl) -> Self {
        if color.is_white() || hsl.s == 0.0 {
            Tone::Neutral
        } else {
            Tone::Chromatic
        }
    }
}

/// Palette adjuster implementing the contrast, remap and dark stages
#[derive(Debug, Clone, Default)]
pub struct PaletteAdjuster {
    config: AdjustmentConfig,
}

impl PaletteAdjuster {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AdjustmentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &AdjustmentConfig {
        &self.config
    }

    /// Run the full chain on a raw dominant color
    pub fn adjust(&self, original: Color) -> Swatches {
        let source = rgb_to_hsl(original);

        let contrast = self.normalize_contrast(original);
        let remapped = self.remap(contrast);
        let adjusted = if source.l > self.config.preserve_saturation_above {
            self.preserve_saturation(remapped, source)
        } else {
            remapped
        };
        let dark = self.darken(adjusted);

        debug!(
            original = %original,
            contrast = %contrast,
            adjusted = %adjusted,
            dark = %dark,
            "adjusted swatch"
        );

        Swatches {
            original,
            contrast,
            adjusted,
            dark,
        }
    }

    /// Stage A: darken until the contrast against white reaches the target
    ///
    /// Lightness drops by a fixed step and is re-measured through RGB each
    /// time. The loop stops at the lightness floor even if the target is
    /// unreachable.
    pub fn normalize_contrast(&self, color: Color) -> Color {
        let target = self.config.contrast_target;
        let mut ratio = contrast_ratio_to_white(color);
        if ratio >= target {
            return color;
        }

        let floor = self.config.lightness_floor;
        let step = self
            .config
            .lightness_step
            .clamp(contrast::MIN_LIGHTNESS_STEP, contrast::MAX_LIGHTNESS_STEP);
        // Independent of the step: at the smallest step the floor is reached first
        let span = contrast::LIGHTNESS_SPAN - floor.clamp(0.0, contrast::LIGHTNESS_SPAN);
        let max_iterations = (span / contrast::MIN_LIGHTNESS_STEP).ceil() as usize + 1;

        let mut hsl = rgb_to_hsl(color);
        let mut iterations = 0;
        while ratio < target && hsl.l > floor && iterations < max_iterations {
            hsl.l = (hsl.l - step).max(floor);
            ratio = contrast_ratio_to_white(hsl_to_rgb(hsl));
            iterations += 1;
        }

        hsl_to_rgb(hsl)
    }

    /// Stage B: remap lightness and saturation
    pub fn remap(&self, color: Color) -> Color {
        hsl_to_rgb(self.remap_hsl(color))
    }

    /// Stage B target coordinates before conversion back to RGB
    pub fn remap_hsl(&self, color: Color) -> Hsl {
        let hsl = rgb_to_hsl(color);

        let (l, s) = match Tone::classify(color, hsl) {
            Tone::Neutral => (
                (remap::NEUTRAL_LIGHTNESS_SCALE * hsl.l).clamp(0.0, remap::NEUTRAL_LIGHTNESS_MAX),
                (remap::NEUTRAL_SATURATION_SCALE * hsl.s).clamp(0.0, remap::NEUTRAL_SATURATION_MAX),
            ),
            Tone::Chromatic => (
                (remap::CHROMATIC_LIGHTNESS_BASE + remap::CHROMATIC_LIGHTNESS_SCALE * hsl.l).clamp(
                    remap::CHROMATIC_LIGHTNESS_BASE,
                    remap::CHROMATIC_LIGHTNESS_MAX,
                ),
                (remap::CHROMATIC_SATURATION_BASE + remap::CHROMATIC_SATURATION_SCALE * hsl.s)
                    .clamp(
                        remap::CHROMATIC_SATURATION_BASE,
                        remap::CHROMATIC_SATURATION_MAX,
                    ),
            ),
        };

        Hsl::new(hsl.h, s, l)
    }

    /// Re-derive a remapped color with the source color's saturation
    pub fn preserve_saturation(&self, remapped: Color, source: Hsl) -> Color {
        hsl_to_rgb(self.preserve_saturation_hsl(remapped, source))
    }

    /// Hue and lightness of `remapped`, saturation of `source`
    pub fn preserve_saturation_hsl(&self, remapped: Color, source: Hsl) -> Hsl {
        let hsl = rgb_to_hsl(remapped);
        Hsl::new(hsl.h, source.s, hsl.l)
    }

    /// Stage C: rotated, desaturated, darker variant
    pub fn darken(&self, color: Color) -> Color {
        hsl_to_rgb(self.darken_hsl(color))
    }

    pub fn darken_hsl(&self, color: Color) -> Hsl {
        let hsl = rgb_to_hsl(color);
        Hsl::new(
            (hsl.h + self.config.dark_hue_shift).rem_euclid(360.0),
            hsl.s * self.config.dark_saturation_scale,
            (hsl.l - self.config.dark_lightness_drop).max(0.0),
        )
    }
}
