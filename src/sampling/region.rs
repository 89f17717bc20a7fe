//! Vertical band sampling with deterministic fallback
//!
//! A [`Region`] is a normalized vertical slice of an image. The sampler
//! crops the band against the image's pixel height, asks the extractor
//! for candidates and keeps the first. When the extractor fails, returns
//! nothing, or is not configured, the band's top-left pixel is used.

use tracing::{debug, warn};

use crate::color::Color;
use crate::constants::{extraction, regions, validation};
use crate::sampling::{PaletteExtractor, PixelBuffer};
use crate::{PaletteError, Result};

/// Normalized vertical band, `0 <= start < end <= 1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Region {
    start: f64,
    end: f64,
}

impl Region {
    /// Whole image
    pub const FULL: Region = Region {
        start: regions::FULL.1,
        end: regions::FULL.2,
    };

    /// Top 20%
    pub const TOP: Region = Region {
        start: regions::TOP.1,
        end: regions::TOP.2,
    };

    /// Bottom 20%
    pub const BOTTOM: Region = Region {
        start: regions::BOTTOM.1,
        end: regions::BOTTOM.2,
    };

    /// # Errors
    ///
    /// Returns `PaletteError::InvalidRegion` unless `0 <= start < end <= 1`
    pub fn new(start: f64, end: f64) -> Result<Self> {
        if start.is_finite() && end.is_finite() && 0.0 <= start && start < end && end <= 1.0 {
            Ok(Self { start, end })
        } else {
            Err(PaletteError::InvalidRegion { start, end })
        }
    }

    pub fn start(&self) -> f64 {
        self.start
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    /// First row and row count of the band for an image `height` px tall
    ///
    /// The row count is floored at 1 so a thin band never yields an empty
    /// crop, and clipped so the band stays inside the image.
    pub fn crop_bounds(&self, height: u32) -> (u32, u32) {
        let h = f64::from(height);
        let start_y = ((h * self.start).floor() as u32).min(height.saturating_sub(1));
        let rows = ((h * (self.end - self.start)).floor() as u32).max(1);
        (start_y, rows.min(height - start_y).max(1))
    }
}

/// Samples one dominant color per region
pub struct RegionSampler {
    extractor: Option<Box<dyn PaletteExtractor>>,
    max_colors: usize,
    min_height: u32,
}

impl std::fmt::Debug for RegionSampler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegionSampler")
            .field("extractor", &self.extractor.is_some())
            .field("max_colors", &self.max_colors)
            .field("min_height", &self.min_height)
            .finish()
    }
}

impl RegionSampler {
    /// Create a sampler backed by `extractor`
    pub fn new(extractor: impl PaletteExtractor + 'static) -> Self {
        Self::from_boxed(Some(Box::new(extractor)))
    }

    /// Create a sampler that always uses the single-pixel fallback
    pub fn without_extractor() -> Self {
        Self::from_boxed(None)
    }

    pub(crate) fn from_boxed(extractor: Option<Box<dyn PaletteExtractor>>) -> Self {
        Self {
            extractor,
            max_colors: extraction::MAX_COLORS,
            min_height: validation::MIN_IMAGE_HEIGHT,
        }
    }

    /// Candidate colors requested from the extractor
    pub fn with_max_colors(mut self, max_colors: usize) -> Self {
        self.max_colors = max_colors.max(1);
        self
    }

    /// Minimum usable image height
    pub fn with_min_height(mut self, min_height: u32) -> Self {
        self.min_height = min_height.max(1);
        self
    }

    pub fn has_extractor(&self) -> bool {
        self.extractor.is_some()
    }

    /// Reject images too small to be split into regions
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::ImageTooSmall` for zero width or a height
    /// below the configured minimum.
    pub fn validate<B: PixelBuffer + ?Sized>(&self, image: &B) -> Result<()> {
        let (width, height) = (image.width(), image.height());
        if width == 0 || height < self.min_height {
            return Err(PaletteError::ImageTooSmall {
                width,
                height,
                min_height: self.min_height,
            });
        }
        Ok(())
    }

    /// Dominant color of `region`
    ///
    /// Extraction problems never surface here; only the size check can fail.
    pub fn extract_dominant<B>(&self, image: &B, region: Region) -> Result<Color>
    where
        B: PixelBuffer + ?Sized,
    {
        self.validate(image)?;

        let (start_y, rows) = region.crop_bounds(image.height());
        let fallback = image.pixel(0, start_y);
        debug!(start_y, rows, "cropped region");

        let Some(extractor) = &self.extractor else {
            debug!(%fallback, "no extractor configured, using top-left pixel");
            return Ok(fallback);
        };

        let pixels = image.crop_rows(start_y, rows);
        match extractor.extract_palette(&pixels, self.max_colors) {
            Ok(colors) => match colors.first() {
                Some(&color) => Ok(color),
                None => {
                    debug!(%fallback, "extractor returned no colors, using top-left pixel");
                    Ok(fallback)
                }
            },
            Err(error) => {
                warn!(%error, %fallback, "extractor failed, using top-left pixel");
                Ok(fallback)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::HistogramExtractor;
    use image::{Rgb, RgbImage};

    fn failing(_: &[Color], _: usize) -> Result<Vec<Color>> {
        Err(PaletteError::extraction("boom"))
    }

    fn empty(_: &[Color], _: usize) -> Result<Vec<Color>> {
        Ok(Vec::new())
    }

    fn gradient(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| Rgb([(x * 10) as u8, y as u8, 100]))
    }

    #[test]
    fn test_region_validation() {
        assert!(Region::new(0.0, 1.0).is_ok());
        assert!(Region::new(0.5, 0.5).is_err());
        assert!(Region::new(-0.1, 0.5).is_err());
        assert!(Region::new(0.2, 1.1).is_err());
        assert!(Region::new(f64::NAN, 1.0).is_err());
    }

    #[test]
    fn test_fixed_regions() {
        assert_eq!(Region::FULL, Region::new(0.0, 1.0).unwrap());
        assert_eq!(Region::TOP.end(), 0.2);
        assert_eq!(Region::BOTTOM.start(), 0.8);
    }

    #[test]
    fn test_crop_bounds() {
        assert_eq!(Region::FULL.crop_bounds(100), (0, 100));
        assert_eq!(Region::TOP.crop_bounds(100), (0, 20));
        assert_eq!(Region::BOTTOM.crop_bounds(100).0, 80);
        assert_eq!(Region::TOP.crop_bounds(5), (0, 1));
        assert_eq!(Region::BOTTOM.crop_bounds(5).0, 4);
    }

    #[test]
    fn test_crop_height_floored_at_one() {
        let thin = Region::new(0.5, 0.51).unwrap();
        assert_eq!(thin.crop_bounds(10), (5, 1));
    }

    #[test]
    fn test_crop_stays_inside_image() {
        for height in 1..200 {
            for region in [Region::FULL, Region::TOP, Region::BOTTOM] {
                let (start_y, rows) = region.crop_bounds(height);
                assert!(rows >= 1);
                assert!(start_y + rows <= height);
            }
        }
    }

    #[test]
    fn test_failing_extractor_falls_back_to_top_left() {
        let image = gradient(8, 50);
        let sampler = RegionSampler::new(failing);
        assert_eq!(
            sampler.extract_dominant(&image, Region::BOTTOM).unwrap(),
            Color::new(0, 40, 100)
        );
        assert_eq!(
            sampler.extract_dominant(&image, Region::FULL).unwrap(),
            Color::new(0, 0, 100)
        );
    }

    #[test]
    fn test_empty_extractor_falls_back_to_top_left() {
        let image = gradient(8, 50);
        let sampler = RegionSampler::new(empty);
        assert_eq!(
            sampler.extract_dominant(&image, Region::BOTTOM).unwrap(),
            Color::new(0, 40, 100)
        );
    }

    #[test]
    fn test_missing_extractor_falls_back_to_top_left() {
        let image = gradient(8, 50);
        let sampler = RegionSampler::without_extractor();
        assert!(!sampler.has_extractor());
        assert_eq!(
            sampler.extract_dominant(&image, Region::TOP).unwrap(),
            Color::new(0, 0, 100)
        );
    }

    #[test]
    fn test_first_candidate_wins() {
        let image = gradient(4, 10);
        let sampler = RegionSampler::new(|_: &[Color], _: usize| -> Result<Vec<Color>> {
            Ok(vec![Color::new(1, 2, 3), Color::new(4, 5, 6)])
        });
        assert_eq!(
            sampler.extract_dominant(&image, Region::FULL).unwrap(),
            Color::new(1, 2, 3)
        );
    }

    #[test]
    fn test_extractor_sees_only_the_band() {
        let image = gradient(3, 10);
        let sampler = RegionSampler::new(|pixels: &[Color], max: usize| -> Result<Vec<Color>> {
            assert_eq!(max, 2);
            assert_eq!(pixels.len(), 3 * 2);
            assert!(pixels.iter().all(|p| p.g < 2));
            Ok(vec![pixels[0]])
        })
        .with_max_colors(2);
        sampler.extract_dominant(&image, Region::TOP).unwrap();
    }

    #[test]
    fn test_histogram_extractor_on_bands() {
        let image = RgbImage::from_fn(6, 20, |_, y| {
            if y < 4 {
                Rgb([200, 20, 20])
            } else {
                Rgb([20, 20, 200])
            }
        });
        let sampler = RegionSampler::new(HistogramExtractor::new());
        assert_eq!(
            sampler.extract_dominant(&image, Region::TOP).unwrap(),
            Color::new(200, 20, 20)
        );
        assert_eq!(
            sampler.extract_dominant(&image, Region::FULL).unwrap(),
            Color::new(20, 20, 200)
        );
    }

    #[test]
    fn test_too_small_image_rejected() {
        let sampler = RegionSampler::without_extractor();
        let short = gradient(10, 4);
        assert!(matches!(
            sampler.extract_dominant(&short, Region::FULL),
            Err(PaletteError::ImageTooSmall { height: 4, .. })
        ));

        let empty = RgbImage::new(0, 10);
        assert!(sampler.validate(&empty).is_err());

        assert!(sampler.validate(&gradient(1, 5)).is_ok());
    }
}
