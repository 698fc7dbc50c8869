//! RGB color type
//!
//! Channels are stored as `f32` in the 0..=255 scale. Palette entries are
//! always built from bytes, while samples flowing through error diffusion may
//! leave that range.

use std::fmt;
use std::str::FromStr;

use crate::palette::ParseColorError;

/// Rec. 601 luma weights used for glyph selection.
const LUMA_R: f32 = 0.299;
const LUMA_G: f32 = 0.587;
const LUMA_B: f32 = 0.114;

/// Luminance of an RGB triple on the 0..=255 scale.
///
/// The result is not clamped; callers that need a bounded value clamp it
/// themselves.
#[inline]
pub fn luminance(r: f32, g: f32, b: f32) -> f32 {
    LUMA_R * r + LUMA_G * g + LUMA_B * b
}

/// A color with three unclamped channels on the 0..=255 scale.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rgb {
    /// Red channel
    pub r: f32,
    /// Green channel
    pub g: f32,
    /// Blue channel
    pub b: f32,
}

impl Rgb {
    /// Pure black.
    pub const BLACK: Rgb = Rgb::new(0.0, 0.0, 0.0);
    /// Pure white.
    pub const WHITE: Rgb = Rgb::new(255.0, 255.0, 255.0);

    /// Create a color from float channels.
    #[inline]
    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    /// Create a color from 8-bit channels.
    ///
    /// # Example
    /// ```
    /// use glyph_dither::Rgb;
    /// let amber = Rgb::from_u8(255, 176, 0);
    /// assert_eq!(amber.g, 176.0);
    /// ```
    #[inline]
    pub const fn from_u8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32, g as f32, b as f32)
    }

    /// Create a color from a byte array `[R, G, B]`.
    #[inline]
    pub const fn from_bytes(bytes: [u8; 3]) -> Self {
        Self::from_u8(bytes[0], bytes[1], bytes[2])
    }

    /// Convert to a byte array `[R, G, B]`, rounding and clamping each channel.
    #[inline]
    pub fn to_bytes(self) -> [u8; 3] {
        [
            self.r.round().clamp(0.0, 255.0) as u8,
            self.g.round().clamp(0.0, 255.0) as u8,
            self.b.round().clamp(0.0, 255.0) as u8,
        ]
    }

    /// Luminance of this color (`0.299r + 0.587g + 0.114b`), unclamped.
    #[inline]
    pub fn luminance(self) -> f32 {
        luminance(self.r, self.g, self.b)
    }

    /// Squared Euclidean distance to another color.
    #[inline]
    pub fn distance_sq(self, other: Rgb) -> f32 {
        let dr = self.r - other.r;
        let dg = self.g - other.g;
        let db = self.b - other.b;
        dr * dr + dg * dg + db * db
    }

    /// Format as a `#rrggbb` hex string.
    pub fn to_hex(self) -> String {
        let [r, g, b] = self.to_bytes();
        format!("#{r:02x}{g:02x}{b:02x}")
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl FromStr for Rgb {
    type Err = ParseColorError;

    /// Parse a color from a hex string.
    ///
    /// Accepts `#RRGGBB`, `RRGGBB`, `#RGB` and `RGB`, case-insensitive, with
    /// surrounding whitespace trimmed.
    ///
    /// ```
    /// use glyph_dither::Rgb;
    ///
    /// let green: Rgb = "#0f0".parse().unwrap();
    /// assert_eq!(green, Rgb::from_u8(0, 255, 0));
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let s = s.strip_prefix('#').unwrap_or(s);

        if !s.is_ascii() {
            return Err(ParseColorError::InvalidLength);
        }

        match s.len() {
            3 => {
                let r = u8::from_str_radix(&s[0..1], 16)? * 17;
                let g = u8::from_str_radix(&s[1..2], 16)? * 17;
                let b = u8::from_str_radix(&s[2..3], 16)? * 17;
                Ok(Self::from_u8(r, g, b))
            }
            6 => {
                let r = u8::from_str_radix(&s[0..2], 16)?;
                let g = u8::from_str_radix(&s[2..4], 16)?;
                let b = u8::from_str_radix(&s[4..6], 16)?;
                Ok(Self::from_u8(r, g, b))
            }
            _ => Err(ParseColorError::InvalidLength),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_weights() {
        assert_eq!(Rgb::BLACK.luminance(), 0.0);
        assert!((Rgb::WHITE.luminance() - 255.0).abs() < 1e-3);
        assert!((Rgb::from_u8(255, 0, 0).luminance() - 76.245).abs() < 1e-3);
    }

    #[test]
    fn test_luminance_is_not_clamped() {
        let hot = Rgb::new(400.0, 400.0, 400.0);
        assert!(hot.luminance() > 255.0);
        let cold = Rgb::new(-20.0, -20.0, -20.0);
        assert!(cold.luminance() < 0.0);
    }

    #[test]
    fn test_distance_sq() {
        let a = Rgb::from_u8(0, 0, 0);
        let b = Rgb::from_u8(3, 4, 0);
        assert_eq!(a.distance_sq(b), 25.0);
        assert_eq!(b.distance_sq(a), 25.0);
    }

    #[test]
    fn test_to_bytes_clamps() {
        assert_eq!(Rgb::new(-5.0, 127.6, 300.0).to_bytes(), [0, 128, 255]);
    }

    #[test]
    fn test_parse_hex_formats() {
        assert_eq!("#FFB000".parse::<Rgb>().unwrap(), Rgb::from_u8(255, 176, 0));
        assert_eq!("ffb000".parse::<Rgb>().unwrap(), Rgb::from_u8(255, 176, 0));
        assert_eq!(" #abc ".parse::<Rgb>().unwrap(), Rgb::from_u8(170, 187, 204));
    }

    #[test]
    fn test_parse_hex_errors() {
        assert_eq!(
            "#ABCD".parse::<Rgb>().unwrap_err(),
            ParseColorError::InvalidLength
        );
        assert!(matches!(
            "#GGGGGG".parse::<Rgb>().unwrap_err(),
            ParseColorError::InvalidHex(_)
        ));
        assert_eq!(
            "#äää".parse::<Rgb>().unwrap_err(),
            ParseColorError::InvalidLength
        );
    }

    #[test]
    fn test_to_hex_round_trip() {
        let color = Rgb::from_u8(0, 170, 85);
        assert_eq!(color.to_hex(), "#00aa55");
        assert_eq!(color.to_hex().parse::<Rgb>().unwrap(), color);
    }
}
