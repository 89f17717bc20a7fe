//! Dominant color extraction
//!
//! The pipeline talks to quantizers through [`PaletteExtractor`]. Any
//! failure or empty result is handled by the region sampler, so
//! implementations are free to give up on difficult input.
//!
//! [`HistogramExtractor`] is the built-in implementation: a popularity
//! quantizer over coarse RGB buckets.

use std::collections::HashMap;

use crate::color::Color;
use crate::constants::extraction::{HISTOGRAM_SHIFT, WHITE_CUTOFF};
use crate::{PaletteError, Result};

/// Source of candidate dominant colors
pub trait PaletteExtractor: Send + Sync {
    /// Return up to `max_colors` representative colors, most dominant first
    ///
    /// An empty vector is a valid answer.
    fn extract_palette(&self, pixels: &[Color], max_colors: usize) -> Result<Vec<Color>>;
}

impl<F> PaletteExtractor for F
where
    F: Fn(&[Color], usize) -> Result<Vec<Color>> + Send + Sync,
{
    fn extract_palette(&self, pixels: &[Color], max_colors: usize) -> Result<Vec<Color>> {
        self(pixels, max_colors)
    }
}

/// Popularity quantizer over `2^(8 - shift)` levels per channel
///
/// Buckets are ranked by population (ties broken by bucket index) and
/// represented by the mean of their pixels. Near-white pixels are skipped
/// by default so that white backgrounds do not dominate; a fully white
/// region therefore yields no colors.
#[derive(Debug, Clone)]
pub struct HistogramExtractor {
    shift: u8,
    skip_white: bool,
}

#[derive(Debug, Default)]
struct Bucket {
    count: u64,
    sum: [u64; 3],
}

impl Bucket {
    fn mean(&self) -> Color {
        let channel = |sum: u64| ((sum + self.count / 2) / self.count) as u8;
        Color::new(channel(self.sum[0]), channel(self.sum[1]), channel(self.sum[2]))
    }
}

impl Default for HistogramExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl HistogramExtractor {
    pub fn new() -> Self {
        Self {
            shift: HISTOGRAM_SHIFT,
            skip_white: true,
        }
    }

    /// Bits dropped per channel before bucketing (at most 7)
    pub fn with_shift(mut self, shift: u8) -> Self {
        self.shift = shift.min(7);
        self
    }

    /// Whether pixels with every channel above the white cutoff are ignored
    pub fn with_skip_white(mut self, skip_white: bool) -> Self {
        self.skip_white = skip_white;
        self
    }

    fn is_background_white(&self, color: Color) -> bool {
        self.skip_white && color.channels().iter().all(|&c| c > WHITE_CUTOFF)
    }
}

impl PaletteExtractor for HistogramExtractor {
    fn extract_palette(&self, pixels: &[Color], max_colors: usize) -> Result<Vec<Color>> {
        if max_colors == 0 {
            return Err(PaletteError::extraction("max_colors must be at least 1"));
        }

        let mut buckets: HashMap<[u8; 3], Bucket> = HashMap::new();
        for &pixel in pixels.iter().filter(|&&p| !self.is_background_white(p)) {
            let key = pixel.channels().map(|c| c >> self.shift);
            let bucket = buckets.entry(key).or_default();
            bucket.count += 1;
            for (sum, channel) in bucket.sum.iter_mut().zip(pixel.channels()) {
                *sum += u64::from(channel);
            }
        }

        let mut ranked: Vec<([u8; 3], Bucket)> = buckets.into_iter().collect();
        ranked.sort_by(|(key_a, a), (key_b, b)| b.count.cmp(&a.count).then(key_a.cmp(key_b)));

        Ok(ranked
            .into_iter()
            .take(max_colors)
            .map(|(_, bucket)| bucket.mean())
            .collect())
    }
}
