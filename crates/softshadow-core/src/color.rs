//! This module re-exports the types from the [`rgb`](https://crates.io/crates/rgb) crate,
//! plus a premultiplied working color used while compositing.

// The following code was copied and modified from
// https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/core/src/color.rs
// Iced license (MIT): https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/LICENSE

pub use rgb::*;

/// The color red with full opacity
pub const RED: RGBA8 = RGBA8 {
    r: 255,
    g: 0,
    b: 0,
    a: 255,
};
/// The color green with full opacity
pub const GREEN: RGBA8 = RGBA8 {
    r: 0,
    g: 255,
    b: 0,
    a: 255,
};
/// A color with no opacity
pub const TRANSPARENT: RGBA8 = RGBA8 {
    r: 0,
    g: 0,
    b: 0,
    a: 0,
};

/// A color packed as 4 floats in the range `[0.0, 1.0]`, with the color
/// channels premultiplied by alpha.
///
/// Blending happens directly on the sRGB-encoded values, the same way
/// most 2D rasterizers composite 8 bit surfaces.
#[derive(Default, Debug, Clone, Copy, PartialEq)]
pub struct PremulRgba(pub [f32; 4]);

impl PremulRgba {
    pub const TRANSPARENT: Self = Self([0.0; 4]);

    /// Scales every channel by `coverage`, clamped to `[0.0, 1.0]`.
    #[inline]
    pub fn scaled(self, coverage: f32) -> Self {
        let c = coverage.clamp(0.0, 1.0);
        Self([self.0[0] * c, self.0[1] * c, self.0[2] * c, self.0[3] * c])
    }

    /// Composites `self` on top of `dst` with the source-over operator.
    #[inline]
    pub fn over(self, dst: Self) -> Self {
        let inv = 1.0 - self.0[3];
        Self([
            self.0[0] + dst.0[0] * inv,
            self.0[1] + dst.0[1] * inv,
            self.0[2] + dst.0[2] * inv,
            self.0[3] + dst.0[3] * inv,
        ])
    }

    /// Converts back to a straight-alpha 8 bit color.
    pub fn to_rgba8(self) -> RGBA8 {
        let a = self.0[3].clamp(0.0, 1.0);
        if a <= 0.0 {
            return TRANSPARENT;
        }

        let unpremul = |c: f32| ((c / a).clamp(0.0, 1.0) * 255.0).round() as u8;

        RGBA8 {
            r: unpremul(self.0[0]),
            g: unpremul(self.0[1]),
            b: unpremul(self.0[2]),
            a: (a * 255.0).round() as u8,
        }
    }
}

impl From<RGBA8> for PremulRgba {
    fn from(color: RGBA8) -> Self {
        let a = f32::from(color.a) * (1.0 / 255.0);
        let c = |v: u8| f32::from(v) * (1.0 / 255.0) * a;
        Self([c(color.r), c(color.g), c(color.b), a])
    }
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum ColorParseError {
    #[error("color must start with '#': {0:?}")]
    MissingHash(String),
    #[error("color has an invalid number of digits: {0:?}")]
    InvalidLength(String),
    #[error("color contains a non-hex digit: {0:?}")]
    InvalidDigit(String),
}

/// Parses a hex color in alpha-first notation: `#RGB`, `#ARGB`, `#RRGGBB`
/// or `#AARRGGBB`.
pub fn parse_hex_color(s: &str) -> Result<RGBA8, ColorParseError> {
    let s = s.trim();
    let digits = s
        .strip_prefix('#')
        .ok_or_else(|| ColorParseError::MissingHash(s.to_string()))?;

    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(ColorParseError::InvalidDigit(s.to_string()));
    }

    let nibble = |i: usize| -> u8 {
        // Digits were validated above.
        let v = u8::from_str_radix(&digits[i..i + 1], 16).unwrap_or(0);
        v << 4 | v
    };
    let byte = |i: usize| -> u8 { u8::from_str_radix(&digits[i..i + 2], 16).unwrap_or(0) };

    let (a, r, g, b) = match digits.len() {
        3 => (255, nibble(0), nibble(1), nibble(2)),
        4 => (nibble(0), nibble(1), nibble(2), nibble(3)),
        6 => (255, byte(0), byte(2), byte(4)),
        8 => (byte(0), byte(2), byte(4), byte(6)),
        _ => return Err(ColorParseError::InvalidLength(s.to_string())),
    };

    Ok(RGBA8 { r, g, b, a })
}
