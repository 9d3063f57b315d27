use softshadow_core::color::{GREEN, RED, RGBA8};
use softshadow_core::math::Vector;

use crate::radius::Radius;
use crate::shadow::Shadow;

pub const DEFAULT_CORNER_RADIUS: f32 = 4.0;
pub const DEFAULT_SHADOW_RADIUS: f32 = 10.0;
pub const DEFAULT_SHADOW_COLOR: RGBA8 = RED;
pub const DEFAULT_FILL_COLOR: RGBA8 = GREEN;

/// How a rounded rectangle and its drop shadow should look.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ShadowStyle {
    /// The corner radii of the filled shape.
    pub corner_radius: Radius,
    /// The color of the filled shape.
    pub fill_color: RGBA8,
    /// The shadow cast behind the shape.
    pub shadow: Shadow,
}

impl ShadowStyle {
    pub const DEFAULT: Self = Self {
        corner_radius: Radius::all_same(DEFAULT_CORNER_RADIUS),
        fill_color: DEFAULT_FILL_COLOR,
        shadow: Shadow {
            color: DEFAULT_SHADOW_COLOR,
            offset: Vector::new(0.0, 0.0),
            blur_radius: DEFAULT_SHADOW_RADIUS,
        },
    };

    pub fn builder() -> ShadowStyleBuilder {
        ShadowStyleBuilder::new()
    }

    pub fn shadow_radius(&self) -> f32 {
        self.shadow.blur_radius
    }

    /// Returns a copy with negative or `NaN` radii replaced by zero.
    pub fn sanitized(&self) -> Self {
        let mut style = *self;

        if style.corner_radius.has_invalid_corner() {
            log::warn!(
                "invalid corner radius {:?}, clamping to zero",
                style.corner_radius
            );
            style.corner_radius = style.corner_radius.clamped(f32::MAX);
        }

        let blur_radius = style.shadow.blur_radius;
        if blur_radius.is_nan() || blur_radius < 0.0 {
            log::warn!("invalid shadow radius {blur_radius}, clamping to zero");
            style.shadow.blur_radius = 0.0;
        }

        style
    }
}

impl Default for ShadowStyle {
    fn default() -> Self {
        Self::DEFAULT
    }
}

pub struct ShadowStyleBuilder {
    style: ShadowStyle,
}

impl ShadowStyleBuilder {
    pub fn new() -> Self {
        Self {
            style: ShadowStyle::DEFAULT,
        }
    }

    pub fn corner_radius(mut self, radius: impl Into<Radius>) -> Self {
        self.style.corner_radius = radius.into();
        self
    }

    pub fn fill_color(mut self, color: impl Into<RGBA8>) -> Self {
        self.style.fill_color = color.into();
        self
    }

    pub fn shadow_color(mut self, color: impl Into<RGBA8>) -> Self {
        self.style.shadow.color = color.into();
        self
    }

    pub fn shadow_offset(mut self, offset: Vector) -> Self {
        self.style.shadow.offset = offset;
        self
    }

    pub fn shadow_radius(mut self, blur_radius: f32) -> Self {
        self.style.shadow.blur_radius = blur_radius;
        self
    }

    pub fn shadow(mut self, shadow: Shadow) -> Self {
        self.style.shadow = shadow;
        self
    }

    pub fn build(self) -> ShadowStyle {
        self.style
    }
}

impl Default for ShadowStyleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl From<ShadowStyleBuilder> for ShadowStyle {
    fn from(b: ShadowStyleBuilder) -> ShadowStyle {
        b.build()
    }
}
