//! Region sampling
//!
//! This module handles pixel access to decoded images, cropping to
//! vertical bands, and dominant color extraction with fallback.

pub mod buffer;
pub mod extractor;
pub mod region;

pub use buffer::PixelBuffer;
pub use extractor::{HistogramExtractor, PaletteExtractor};
pub use region::{Region, RegionSampler};
