//! Image loading for the command-line front end
//!
//! The palette pipeline works on decoded pixels only; this module turns a
//! file on disk into an RGB8 buffer via the `image` crate.
//!
//! ## Supported Formats
//!
//! JPEG, PNG, GIF, WebP, TIFF, BMP, ICO, TGA, EXR, PNM, QOI, DDS, HDR
//!
//! Alpha channels are dropped and only the first frame of animated
//! formats is decoded.

use std::path::Path;

use image::{DynamicImage, ImageReader, RgbImage};
use tracing::debug;

use crate::error::{PaletteError, Result};

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
    /// GIF image (first frame only)
    Gif,
    /// WebP image
    WebP,
    /// TIFF image
    Tiff,
    /// BMP image
    Bmp,
    /// ICO image
    Ico,
    /// TGA image
    Tga,
    /// OpenEXR image
    Exr,
    /// PNM image (PBM, PGM, PPM)
    Pnm,
    /// QOI image
    Qoi,
    /// DDS image
    Dds,
    /// HDR image
    Hdr,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "gif" => Some(ImageFormat::Gif),
            "webp" => Some(ImageFormat::WebP),
            "tiff" | "tif" => Some(ImageFormat::Tiff),
            "bmp" => Some(ImageFormat::Bmp),
            "ico" => Some(ImageFormat::Ico),
            "tga" => Some(ImageFormat::Tga),
            "exr" => Some(ImageFormat::Exr),
            "pbm" | "pgm" | "ppm" | "pnm" => Some(ImageFormat::Pnm),
            "qoi" => Some(ImageFormat::Qoi),
            "dds" => Some(ImageFormat::Dds),
            "hdr" => Some(ImageFormat::Hdr),
            _ => None,
        }
    }
}

/// Load an image from disk as an RGB8 buffer
///
/// # Errors
///
/// Returns `PaletteError::ImageLoadError` if the extension is unknown,
/// the file cannot be opened, or decoding fails.
pub fn load_image(path: &Path) -> Result<RgbImage> {
    let format = ImageFormat::from_extension(path).ok_or_else(|| PaletteError::ImageLoadError {
        message: format!("Unknown image format for file: {}", path.display()),
        source: None,
    })?;
    debug!(?format, path = %path.display(), "loading image");

    let reader = ImageReader::open(path).map_err(|e| {
        PaletteError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;

    let img: DynamicImage = reader.decode().map_err(|e| {
        PaletteError::image_load(format!("Failed to decode image: {}", path.display()), e)
    })?;

    Ok(img.to_rgb8())
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &[
        "jpg", "jpeg", "png", "gif", "webp", "tiff", "tif", "bmp", "ico", "tga", "exr", "pbm",
        "pgm", "ppm", "pnm", "qoi", "dds", "hdr",
    ]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.jpg")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("photo.JPEG")),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("logo.png")),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            ImageFormat::from_extension(Path::new("banner.webp")),
            Some(ImageFormat::WebP)
        );
        assert_eq!(ImageFormat::from_extension(Path::new("photo.heic")), None);
        assert_eq!(ImageFormat::from_extension(Path::new("no_extension")), None);
    }

    #[test]
    fn test_supported_extensions() {
        assert!(is_supported_extension("jpg"));
        assert!(is_supported_extension("JPEG"));
        assert!(is_supported_extension("png"));
        assert!(!is_supported_extension("heic"));
        assert!(!is_supported_extension("doc"));
    }

    #[test]
    fn test_every_supported_extension_is_detected() {
        for ext in supported_extensions() {
            let path = format!("file.{}", ext);
            assert!(ImageFormat::from_extension(Path::new(&path)).is_some(), "{}", ext);
        }
    }

    #[test]
    fn test_load_png_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bands.png");
        let source = RgbImage::from_fn(3, 6, |_, y| Rgb([y as u8 * 40, 10, 200]));
        source.save(&path).unwrap();

        let loaded = load_image(&path).unwrap();
        assert_eq!(loaded, source);
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_image(Path::new("nonexistent_file.png")).unwrap_err();
        assert!(matches!(err, PaletteError::ImageLoadError { .. }));
    }

    #[test]
    fn test_load_unknown_extension() {
        let err = load_image(Path::new("notes.txt")).unwrap_err();
        assert!(matches!(err, PaletteError::ImageLoadError { source: None, .. }));
    }
}
