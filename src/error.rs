//! Error types for the region_palette library

use thiserror::Error;

/// Result type alias for region_palette operations
pub type Result<T> = std::result::Result<T, PaletteError>;

/// Error types for palette extraction operations
#[derive(Error, Debug)]
pub enum PaletteError {
    /// Image is too small to be split into sampling regions
    #[error("Image too small: {width}x{height} px (minimum height {min_height} px)")]
    ImageTooSmall {
        width: u32,
        height: u32,
        min_height: u32,
    },

    /// Region bounds outside 0 <= start < end <= 1
    #[error("Invalid region: start = {start}, end = {end}")]
    InvalidRegion { start: f64, end: f64 },

    /// Hex color string could not be parsed
    #[error("Invalid hex color: {value:?}")]
    InvalidHexColor { value: String },

    /// Palette extractor failed. Absorbed by the region sampler.
    #[error("Palette extraction failed: {message}")]
    ExtractionError { message: String },

    /// Image file could not be loaded or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration file could not be read, parsed or written
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Invalid input parameters
    #[error("Invalid parameter: {parameter} = {value}")]
    InvalidParameter { parameter: String, value: String },
}

impl PaletteError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a configuration error with context
    pub fn config<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ConfigError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an extraction error
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::ExtractionError {
            message: message.into(),
        }
    }

    /// Check if this error indicates a recoverable condition
    ///
    /// Extraction failures are recovered locally by the single-pixel
    /// fallback and never reach callers of the pipeline.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, PaletteError::ExtractionError { .. })
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            PaletteError::ImageTooSmall { min_height, .. } => format!(
                "The image is too small to split into regions. Please use an image at least {} px tall.",
                min_height
            ),
            PaletteError::ImageLoadError { .. } => {
                "Could not load the image. Please check the file format and try again.".to_string()
            }
            PaletteError::ConfigError { .. } => {
                "Could not read the configuration file. Please check that it is valid JSON.".to_string()
            }
            PaletteError::InvalidHexColor { value } => {
                format!("'{}' is not a valid #RRGGBB color.", value)
            }
            _ => "Color extraction failed. Please try with a different image.".to_string(),
        }
    }
}
