// The following code was copied and modified from
// https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/core/src/border.rs
// Iced license (MIT): https://github.com/iced-rs/iced/blob/31d1d5fecbef50fa319cabd5d4194f1e4aaefa21/LICENSE

/// Corner radii of a rounded rectangle, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Radius {
    pub top_left: f32,
    pub top_right: f32,
    pub bottom_right: f32,
    pub bottom_left: f32,
}

impl Radius {
    pub const fn new(top_left: f32, top_right: f32, bottom_right: f32, bottom_left: f32) -> Self {
        Self {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
        }
    }

    pub const fn all_same(val: f32) -> Self {
        Self {
            top_left: val,
            top_right: val,
            bottom_right: val,
            bottom_left: val,
        }
    }

    pub const ZERO: Self = Self {
        top_left: 0.0,
        top_right: 0.0,
        bottom_right: 0.0,
        bottom_left: 0.0,
    };

    /// Returns `true` if any corner is negative or not a number.
    pub fn has_invalid_corner(&self) -> bool {
        <[f32; 4]>::from(*self)
            .iter()
            .any(|r| r.is_nan() || *r < 0.0)
    }

    /// Each corner clamped to `0.0..=max`. `NaN` corners become zero.
    pub fn clamped(&self, max: f32) -> Self {
        let max = max.max(0.0);
        let c = |r: f32| if r.is_nan() { 0.0 } else { r.clamp(0.0, max) };
        Self {
            top_left: c(self.top_left),
            top_right: c(self.top_right),
            bottom_right: c(self.bottom_right),
            bottom_left: c(self.bottom_left),
        }
    }

    /// The radius of the corner facing the quadrant of `(dx, dy)`, where
    /// `dx`/`dy` are measured from the rectangle's center with y pointing down.
    #[inline]
    pub fn for_quadrant(&self, dx: f32, dy: f32) -> f32 {
        match (dx > 0.0, dy > 0.0) {
            (false, false) => self.top_left,
            (true, false) => self.top_right,
            (true, true) => self.bottom_right,
            (false, true) => self.bottom_left,
        }
    }
}

impl From<f32> for Radius {
    fn from(w: f32) -> Self {
        Self::all_same(w)
    }
}

impl From<[f32; 4]> for Radius {
    fn from(radi: [f32; 4]) -> Self {
        Self {
            top_left: radi[0],
            top_right: radi[1],
            bottom_right: radi[2],
            bottom_left: radi[3],
        }
    }
}

impl From<Radius> for [f32; 4] {
    fn from(radi: Radius) -> Self {
        [
            radi.top_left,
            radi.top_right,
            radi.bottom_right,
            radi.bottom_left,
        ]
    }
}

/// An alias for `Radius::new(val, val, val, val)`
pub const fn radius(val: f32) -> Radius {
    Radius::all_same(val)
}
