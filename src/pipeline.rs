//! Palette orchestration over the configured regions
//!
//! For each region: sample one dominant color, run it through the
//! adjustment chain, and label the result. Regions are independent and
//! computed in parallel; output order follows the configured region order.

use rayon::prelude::*;
use tracing::{debug, info_span};

use crate::color::PaletteAdjuster;
use crate::config::PipelineConfig;
use crate::sampling::{HistogramExtractor, PaletteExtractor, PixelBuffer, Region, RegionSampler};
use crate::{PaletteResult, Result};

/// Drives region sampling and adjustment for one image at a time
#[derive(Debug)]
pub struct PaletteGenerator {
    sampler: RegionSampler,
    adjuster: PaletteAdjuster,
    regions: Vec<(String, Region)>,
}

impl Default for PaletteGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl PaletteGenerator {
    /// Default regions and adjustment, backed by [`HistogramExtractor`]
    pub fn new() -> Self {
        let config = PipelineConfig::default();
        // Default bands are valid constants
        let regions = config
            .regions
            .iter()
            .filter_map(|r| r.region().ok().map(|region| (r.label.clone(), region)))
            .collect();
        Self {
            sampler: sampler_for(&config, Some(Box::new(HistogramExtractor::new()))),
            adjuster: PaletteAdjuster::with_config(config.adjustment),
            regions,
        }
    }

    /// Build from a configuration and a palette extractor
    ///
    /// # Errors
    ///
    /// Returns the first validation error of `config`.
    pub fn from_config(
        config: &PipelineConfig,
        extractor: impl PaletteExtractor + 'static,
    ) -> Result<Self> {
        Self::build(config, Some(Box::new(extractor)))
    }

    /// Build from a configuration with no extractor; every region uses the
    /// top-left pixel of its band.
    pub fn from_config_without_extractor(config: &PipelineConfig) -> Result<Self> {
        Self::build(config, None)
    }

    fn build(
        config: &PipelineConfig,
        extractor: Option<Box<dyn PaletteExtractor>>,
    ) -> Result<Self> {
        config.validate()?;

        let regions = config
            .regions
            .iter()
            .map(|r| r.region().map(|region| (r.label.clone(), region)))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            sampler: sampler_for(config, extractor),
            adjuster: PaletteAdjuster::with_config(config.adjustment.clone()),
            regions,
        })
    }

    pub fn regions(&self) -> &[(String, Region)] {
        &self.regions
    }

    /// Extract one labelled palette per region
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::ImageTooSmall` before any region is sampled
    /// if the image cannot be split. Nothing else fails: extraction
    /// problems fall back to the band's top-left pixel.
    pub fn generate<B>(&self, image: &B) -> Result<Vec<PaletteResult>>
    where
        B: PixelBuffer + Sync + ?Sized,
    {
        let span = info_span!("generate", width = image.width(), height = image.height());
        let _guard = span.enter();

        self.sampler.validate(image)?;

        self.regions
            .par_iter()
            .map(|(label, region)| -> Result<PaletteResult> {
                // Rayon workers do not inherit the caller's entered span
                span.in_scope(|| {
                    let dominant = self.sampler.extract_dominant(image, *region)?;
                    let swatches = self.adjuster.adjust(dominant);
                    debug!(region = %label, dominant = %dominant, "region palette ready");
                    Ok(PaletteResult::new(label.clone(), swatches))
                })
            })
            .collect()
    }
}

fn sampler_for(
    config: &PipelineConfig,
    extractor: Option<Box<dyn PaletteExtractor>>,
) -> RegionSampler {
    RegionSampler::from_boxed(extractor)
        .with_max_colors(config.max_colors)
        .with_min_height(config.min_image_height)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::Color;
    use crate::config::RegionConfig;
    use crate::PaletteError;
    use image::{Rgb, RgbImage};

    fn banded(height: u32) -> RgbImage {
        let top_end = height / 5;
        let bottom_start = height - height / 5;
        RgbImage::from_fn(4, height, |_, y| {
            if y < top_end {
                Rgb([220, 30, 30])
            } else if y >= bottom_start {
                Rgb([128, 128, 128])
            } else {
                Rgb([0, 34, 204])
            }
        })
    }

    #[test]
    fn test_default_generator_labels_and_order() {
        let results = PaletteGenerator::new().generate(&banded(100)).unwrap();
        let labels: Vec<&str> = results.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(labels, ["Primary", "Header", "Footer"]);
    }

    #[test]
    fn test_default_generator_matches_default_config() {
        let from_config =
            PaletteGenerator::from_config(&PipelineConfig::default(), HistogramExtractor::new())
                .unwrap();
        assert_eq!(PaletteGenerator::new().regions(), from_config.regions());
        assert_eq!(
            PaletteGenerator::new().regions()[2],
            ("Footer".to_string(), Region::BOTTOM)
        );
    }

    #[test]
    fn test_default_generator_colors() {
        let results = PaletteGenerator::new().generate(&banded(100)).unwrap();

        assert_eq!(results[0].original, Color::new(0, 34, 204));
        assert_eq!(results[0].adjusted.to_hex(), "#0B2DD5");
        assert_eq!(results[0].dark.to_hex(), "#0E0E86");

        assert_eq!(results[1].original, Color::new(220, 30, 30));
        assert_eq!(results[1].adjusted.to_hex(), "#DD1F1F");
        assert_eq!(results[1].dark.to_hex(), "#91301C");

        assert_eq!(results[2].original, Color::new(128, 128, 128));
        assert_eq!(results[2].adjusted.to_hex(), "#666666");
        assert_eq!(results[2].dark.to_hex(), "#404040");
    }

    #[test]
    fn test_too_small_image_fails_fast() {
        let extractor = |_: &[Color], _: usize| -> Result<Vec<Color>> {
            panic!("extractor must not run for rejected images")
        };
        let generator =
            PaletteGenerator::from_config(&PipelineConfig::default(), extractor).unwrap();
        assert!(matches!(
            generator.generate(&banded(4)),
            Err(PaletteError::ImageTooSmall { height: 4, .. })
        ));
    }

    #[test]
    fn test_without_extractor_uses_band_corners() {
        let generator =
            PaletteGenerator::from_config_without_extractor(&PipelineConfig::default()).unwrap();
        let results = generator.generate(&banded(50)).unwrap();
        assert_eq!(results[0].original, Color::new(220, 30, 30));
        assert_eq!(results[1].original, Color::new(220, 30, 30));
        assert_eq!(results[2].original, Color::new(128, 128, 128));
    }

    #[test]
    fn test_custom_regions() {
        let config = PipelineConfig {
            regions: vec![RegionConfig {
                label: "Middle".to_string(),
                start: 0.4,
                end: 0.6,
            }],
            ..PipelineConfig::default()
        };
        let generator = PaletteGenerator::from_config(&config, HistogramExtractor::new()).unwrap();
        let results = generator.generate(&banded(100)).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].label, "Middle");
        assert_eq!(results[0].original, Color::new(0, 34, 204));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = PipelineConfig::default();
        config.regions[0].start = 2.0;
        assert!(PaletteGenerator::from_config_without_extractor(&config).is_err());
    }
}
