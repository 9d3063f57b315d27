// The following code was copied and modified from
// https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/core/src/shadow.rs
// Iced license (MIT): https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/LICENSE

use softshadow_core::color::RGBA8;
use softshadow_core::math::Vector;

/// A drop shadow cast by a shape.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Shadow {
    /// The color of the shadow.
    pub color: RGBA8,

    /// The offset of the shadow in pixels.
    pub offset: Vector,

    /// The blur radius of the shadow in pixels.
    ///
    /// This is also the amount of padding added on every side of the
    /// rendered bitmap so the blur is not clipped.
    pub blur_radius: f32,
}

/// Converts a blur radius into the standard deviation of the gaussian
/// used to blur the shadow.
///
/// Uses the same scale as common 2D rasterizers (`1 / sqrt(3)` plus a
/// half-pixel bias), so a given radius looks the same as it would on
/// a platform canvas. A radius of zero disables the blur.
pub fn blur_sigma(blur_radius: f32) -> f32 {
    if blur_radius > 0.0 {
        0.57735 * blur_radius + 0.5
    } else {
        0.0
    }
}

/// The total number of pixels added to each axis of the bitmap so the
/// blur has room to bleed outward (`blur_radius` on each side, truncated
/// to whole pixels).
pub fn shadow_bleed(blur_radius: f32) -> u32 {
    if blur_radius > 0.0 {
        (blur_radius * 2.0) as u32
    } else {
        0
    }
}

/// The margin applied on every side of the backing element so the padded
/// bitmap lines up with its container's bounds.
pub fn shadow_margin(blur_radius: f32) -> i32 {
    if blur_radius > 0.0 {
        -(blur_radius as i32)
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bleed_truncates_fractional_radii() {
        assert_eq!(shadow_bleed(10.0), 20);
        assert_eq!(shadow_bleed(2.7), 5);
        assert_eq!(shadow_bleed(0.0), 0);
        assert_eq!(shadow_bleed(-3.0), 0);

        assert_eq!(shadow_margin(10.0), -10);
        assert_eq!(shadow_margin(2.7), -2);
    }

    #[test]
    fn zero_radius_disables_blur() {
        assert_eq!(blur_sigma(0.0), 0.0);
        assert!((blur_sigma(10.0) - 6.2735).abs() < 1e-4);
    }
}
