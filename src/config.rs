//! Configuration structures for the region palette pipeline.
//!
//! This module defines the tunable parameters of the pipeline: which
//! regions are sampled, how many candidates the extractor is asked for,
//! and the constants of the three adjustment stages.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use region_palette::PipelineConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = PipelineConfig::from_json_file(Path::new("palette.json"))?;
//!
//! // Or use defaults
//! let config = PipelineConfig::default();
//! # Ok::<(), region_palette::PaletteError>(())
//! ```
//!
//! Every field has a default, so a partial JSON document only needs the
//! values it overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{contrast, dark, extraction, regions, remap, validation};
use crate::sampling::Region;
use crate::{PaletteError, Result};

/// Complete pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineConfig {
    /// Images shorter than this are rejected before sampling
    pub min_image_height: u32,

    /// Candidate colors requested from the extractor per region
    pub max_colors: usize,

    /// Labelled sampling regions, processed in order
    pub regions: Vec<RegionConfig>,

    /// Adjustment stage parameters
    pub adjustment: AdjustmentConfig,
}

/// A labelled vertical band of the image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegionConfig {
    /// Opaque tag attached to the region's result
    pub label: String,

    /// Start of the band as a fraction of image height
    pub start: f64,

    /// End of the band as a fraction of image height
    pub end: f64,
}

/// Parameters of the contrast, remap and dark-variant stages.
///
/// The remap formulas themselves are fixed; see [`crate::constants::remap`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdjustmentConfig {
    /// Minimum contrast ratio against white
    pub contrast_target: f64,

    /// Lightness decrement per contrast iteration
    pub lightness_step: f64,

    /// Lowest lightness the contrast stage may reach
    pub lightness_floor: f64,

    /// Source lightness above which the source saturation is kept
    pub preserve_saturation_above: f64,

    /// Hue rotation of the dark variant, in degrees
    pub dark_hue_shift: f64,

    /// Saturation multiplier of the dark variant
    pub dark_saturation_scale: f64,

    /// Lightness decrement of the dark variant
    pub dark_lightness_drop: f64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            min_image_height: validation::MIN_IMAGE_HEIGHT,
            max_colors: extraction::MAX_COLORS,
            regions: [regions::FULL, regions::TOP, regions::BOTTOM]
                .into_iter()
                .map(|(label, start, end)| RegionConfig {
                    label: label.to_string(),
                    start,
                    end,
                })
                .collect(),
            adjustment: AdjustmentConfig::default(),
        }
    }
}

impl Default for AdjustmentConfig {
    fn default() -> Self {
        Self {
            contrast_target: contrast::TARGET_RATIO,
            lightness_step: contrast::LIGHTNESS_STEP,
            lightness_floor: contrast::LIGHTNESS_FLOOR,
            preserve_saturation_above: remap::PRESERVE_SATURATION_ABOVE,
            dark_hue_shift: dark::HUE_SHIFT,
            dark_saturation_scale: dark::SATURATION_SCALE,
            dark_lightness_drop: dark::LIGHTNESS_DROP,
        }
    }
}

impl RegionConfig {
    /// Validated region bounds
    pub fn region(&self) -> Result<Region> {
        Region::new(self.start, self.end)
    }
}

impl PipelineConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            PaletteError::config(format!("Failed to read {}", path.display()), e)
        })?;
        let config: Self = serde_json::from_str(&content).map_err(|e| {
            PaletteError::config(format!("Failed to parse {}", path.display()), e)
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PaletteError::config("Failed to serialize configuration", e))?;
        std::fs::write(path, json).map_err(|e| {
            PaletteError::config(format!("Failed to write {}", path.display()), e)
        })?;
        Ok(())
    }

    /// Check parameter ranges
    ///
    /// # Errors
    ///
    /// Returns `InvalidRegion` for malformed bands and `InvalidParameter`
    /// for out-of-range scalars.
    pub fn validate(&self) -> Result<()> {
        if self.min_image_height == 0 {
            return Err(invalid("min_image_height", self.min_image_height));
        }
        if self.max_colors == 0 {
            return Err(invalid("max_colors", self.max_colors));
        }
        if self.regions.is_empty() {
            return Err(invalid("regions", "[]"));
        }
        for region in &self.regions {
            region.region()?;
        }

        let adjustment = &self.adjustment;
        if !(contrast::MIN_LIGHTNESS_STEP..=contrast::MAX_LIGHTNESS_STEP)
            .contains(&adjustment.lightness_step)
        {
            return Err(invalid("adjustment.lightness_step", adjustment.lightness_step));
        }
        if !(0.0..=100.0).contains(&adjustment.lightness_floor) {
            return Err(invalid("adjustment.lightness_floor", adjustment.lightness_floor));
        }
        if !(1.0..=21.0).contains(&adjustment.contrast_target) {
            return Err(invalid("adjustment.contrast_target", adjustment.contrast_target));
        }
        if !(adjustment.dark_saturation_scale >= 0.0) {
            return Err(invalid(
                "adjustment.dark_saturation_scale",
                adjustment.dark_saturation_scale,
            ));
        }
        Ok(())
    }
}

fn invalid(parameter: &str, value: impl ToString) -> PaletteError {
    PaletteError::InvalidParameter {
        parameter: parameter.to_string(),
        value: value.to_string(),
    }
}
