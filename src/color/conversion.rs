//! RGB <-> HSL conversion and hex encoding
//!
//! HSL values follow the CSS convention: hue in degrees [0, 360),
//! saturation and lightness in percent [0, 100]. Conversion from RGB
//! rounds every component to the nearest integer, so HSL produced here is
//! always integral. The adjustment stages may feed fractional values back
//! in; [`hsl_to_rgb`] accepts any finite input and clamps its output.

use std::fmt;

use palette::Srgb;
use serde::{Deserialize, Serialize};

use crate::{PaletteError, Result};

/// An opaque 8-bit sRGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Cylindrical HSL coordinates (degrees, percent, percent)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hsl {
    pub h: f64,
    pub s: f64,
    pub l: f64,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);
    pub const BLACK: Color = Color::new(0, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Channels as an `[r, g, b]` array
    pub fn channels(self) -> [u8; 3] {
        [self.r, self.g, self.b]
    }

    pub fn is_white(self) -> bool {
        self == Color::WHITE
    }

    pub fn to_hsl(self) -> Hsl {
        rgb_to_hsl(self)
    }

    /// Uppercase `#RRGGBB` representation
    pub fn to_hex(self) -> String {
        to_hex(self)
    }

    /// Parse `#RRGGBB` or `RRGGBB` (case-insensitive)
    ///
    /// # Errors
    ///
    /// Returns `PaletteError::InvalidHexColor` if the string is not six hex digits
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        let invalid = || PaletteError::InvalidHexColor {
            value: hex.to_string(),
        };

        if digits.len() != 6 || !digits.is_ascii() {
            return Err(invalid());
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16).map_err(|_| invalid())
        };

        Ok(Self::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Normalized floating point sRGB for luminance computations
    pub fn to_srgb(self) -> Srgb<f32> {
        Srgb::<u8>::from(self).into_format()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl From<Srgb<u8>> for Color {
    fn from(srgb: Srgb<u8>) -> Self {
        Self::new(srgb.red, srgb.green, srgb.blue)
    }
}

impl From<Color> for Srgb<u8> {
    fn from(color: Color) -> Self {
        Srgb::new(color.r, color.g, color.b)
    }
}

impl From<[u8; 3]> for Color {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self::new(r, g, b)
    }
}

impl From<Color> for String {
    fn from(color: Color) -> Self {
        color.to_hex()
    }
}

impl TryFrom<String> for Color {
    type Error = PaletteError;

    fn try_from(value: String) -> Result<Self> {
        Color::from_hex(&value)
    }
}

impl Hsl {
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    pub fn to_rgb(self) -> Color {
        hsl_to_rgb(self)
    }
}

/// Convert an 8-bit RGB color to rounded HSL
///
/// Achromatic colors (max == min) get hue 0 and saturation 0.
pub fn rgb_to_hsl(color: Color) -> Hsl {
    let r = f64::from(color.r) / 255.0;
    let g = f64::from(color.g) / 255.0;
    let b = f64::from(color.b) / 255.0;

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    let l = (max + min) / 2.0;

    let (h, s) = if max == min {
        (0.0, 0.0)
    } else {
        let d = max - min;
        let s = if l > 0.5 {
            d / (2.0 - max - min)
        } else {
            d / (max + min)
        };

        let sector = if max == r {
            (g - b) / d + if g < b { 6.0 } else { 0.0 }
        } else if max == g {
            (b - r) / d + 2.0
        } else {
            (r - g) / d + 4.0
        };

        let mut h = (sector * 60.0) % 360.0;
        if h < 0.0 {
            h += 360.0;
        }
        (h, s)
    };

    // Rounding can land exactly on 360
    Hsl::new(h.round() % 360.0, (s * 100.0).round(), (l * 100.0).round())
}

/// Convert HSL back to an 8-bit RGB color
///
/// Hue is reduced modulo 360 first. Output channels are rounded and
/// clamped to [0, 255], absorbing drift from out-of-range inputs.
pub fn hsl_to_rgb(hsl: Hsl) -> Color {
    let h = hsl.h.rem_euclid(360.0) / 360.0;
    let s = hsl.s / 100.0;
    let l = hsl.l / 100.0;

    let (r, g, b) = if s == 0.0 {
        (l, l, l)
    } else {
        let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
        let p = 2.0 * l - q;
        (
            hue_to_channel(p, q, h + 1.0 / 3.0),
            hue_to_channel(p, q, h),
            hue_to_channel(p, q, h - 1.0 / 3.0),
        )
    };

    Color::new(to_channel(r), to_channel(g), to_channel(b))
}

/// Uppercase `#RRGGBB` with zero-padded channels
pub fn to_hex(color: Color) -> String {
    color.to_string()
}

fn hue_to_channel(p: f64, q: f64, mut t: f64) -> f64 {
    if t < 0.0 {
        t += 1.0;
    }
    if t > 1.0 {
        t -= 1.0;
    }
    if t < 1.0 / 6.0 {
        return p + (q - p) * 6.0 * t;
    }
    if t < 1.0 / 2.0 {
        return q;
    }
    if t < 2.0 / 3.0 {
        return p + (q - p) * (2.0 / 3.0 - t) * 6.0;
    }
    p
}

fn to_channel(value: f64) -> u8 {
    (value * 255.0).round().clamp(0.0, 255.0) as u8
}
