//! Reading a [`ShadowStyle`] from declarative attributes.

use std::cell::Cell;

use rustc_hash::FxHashMap;

use softshadow_core::color::{parse_hex_color, ColorParseError, RGBA8};
use softshadow_core::math::{vector, ScaleFactor};
use softshadow_raster::{
    Radius, ShadowStyle, DEFAULT_CORNER_RADIUS, DEFAULT_FILL_COLOR, DEFAULT_SHADOW_COLOR,
    DEFAULT_SHADOW_RADIUS,
};

pub const ATTR_CORNER_RADIUS: &str = "corner_radius";
pub const ATTR_SHADOW_RADIUS: &str = "shadow_radius";
pub const ATTR_DX: &str = "dx";
pub const ATTR_DY: &str = "dy";
pub const ATTR_SHADOW_COLOR: &str = "shadow_color";
pub const ATTR_FILL_COLOR: &str = "fill_color";

/// The attributes understood by a shadow layout.
pub const SHADOW_LAYOUT_STYLEABLE: &[&str] = &[
    ATTR_CORNER_RADIUS,
    ATTR_SHADOW_RADIUS,
    ATTR_DX,
    ATTR_DY,
    ATTR_SHADOW_COLOR,
    ATTR_FILL_COLOR,
];

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum AttributeError {
    #[error("invalid dimension {0:?}")]
    InvalidDimension(String),

    #[error("invalid color: {0}")]
    InvalidColor(#[from] ColorParseError),

    #[error("malformed attribute declaration {0:?}")]
    Malformed(String),
}

/// A source of raw attribute values, such as parsed markup.
pub trait AttributeSource {
    /// The raw value of the attribute `name`, if it is set.
    fn raw_value(&self, name: &str) -> Option<&str>;

    /// The density used to convert density-independent dimensions to pixels.
    fn density(&self) -> ScaleFactor {
        ScaleFactor::default()
    }

    /// Called once when a [`StyledAttributes`] handle obtained from this
    /// source is dropped.
    fn release(&self) {}
}

/// Opens a scoped view of the attributes in `styleable`.
///
/// The source is released when the returned handle is dropped. Returns
/// `None` if there is no source to read from.
pub fn obtain_styled_attributes<'a, S: AttributeSource + ?Sized>(
    source: Option<&'a S>,
    styleable: &'static [&'static str],
) -> Option<StyledAttributes<'a, S>> {
    source.map(|source| StyledAttributes { source, styleable })
}

pub struct StyledAttributes<'a, S: AttributeSource + ?Sized> {
    source: &'a S,
    styleable: &'static [&'static str],
}

impl<S: AttributeSource + ?Sized> StyledAttributes<'_, S> {
    fn raw(&self, name: &str) -> Option<&str> {
        if !self.styleable.iter().any(|s| *s == name) {
            log::warn!("attribute {name:?} is not part of this styleable");
            return None;
        }
        self.source.raw_value(name)
    }

    /// Reads a dimension in pixels, or `default` if it is unset or invalid.
    pub fn get_dimension(&self, name: &str, default: f32) -> f32 {
        let Some(raw) = self.raw(name) else {
            return default;
        };
        match parse_dimension(raw, self.source.density()) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("ignoring attribute {name:?}: {e}");
                default
            }
        }
    }

    /// Reads a color, or `default` if it is unset or invalid.
    pub fn get_color(&self, name: &str, default: RGBA8) -> RGBA8 {
        let Some(raw) = self.raw(name) else {
            return default;
        };
        match parse_hex_color(raw) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("ignoring attribute {name:?}: {e}");
                default
            }
        }
    }
}

impl<S: AttributeSource + ?Sized> Drop for StyledAttributes<'_, S> {
    fn drop(&mut self) {
        self.source.release();
    }
}

/// Parses a dimension such as `12`, `12px`, `4dp` or `4.5dip` into pixels.
/// Density-independent units are multiplied by `density`.
pub fn parse_dimension(value: &str, density: ScaleFactor) -> Result<f32, AttributeError> {
    let value = value.trim();
    let invalid = || AttributeError::InvalidDimension(value.to_string());

    let (number, scale) = if let Some(n) = value.strip_suffix("px") {
        (n, 1.0)
    } else if let Some(n) = value.strip_suffix("dip") {
        (n, density.0)
    } else if let Some(n) = value.strip_suffix("dp") {
        (n, density.0)
    } else if let Some(n) = value.strip_suffix("sp") {
        (n, density.0)
    } else {
        (value, 1.0)
    };

    let v: f32 = number.trim().parse().map_err(|_| invalid())?;
    if !v.is_finite() {
        return Err(invalid());
    }

    Ok(v * scale)
}

/// Builds a style from `source`, falling back to the documented default
/// for every attribute that is missing or cannot be parsed.
///
/// A missing source yields [`ShadowStyle::DEFAULT`].
pub fn style_from_attributes<S: AttributeSource + ?Sized>(source: Option<&S>) -> ShadowStyle {
    let Some(attrs) = obtain_styled_attributes(source, SHADOW_LAYOUT_STYLEABLE) else {
        log::debug!("no attribute source, using default shadow style");
        return ShadowStyle::DEFAULT;
    };

    let mut style = ShadowStyle::DEFAULT;
    style.corner_radius =
        Radius::all_same(attrs.get_dimension(ATTR_CORNER_RADIUS, DEFAULT_CORNER_RADIUS));
    style.shadow.blur_radius = attrs.get_dimension(ATTR_SHADOW_RADIUS, DEFAULT_SHADOW_RADIUS);
    style.shadow.offset = vector(
        attrs.get_dimension(ATTR_DX, 0.0),
        attrs.get_dimension(ATTR_DY, 0.0),
    );
    style.shadow.color = attrs.get_color(ATTR_SHADOW_COLOR, DEFAULT_SHADOW_COLOR);
    style.fill_color = attrs.get_color(ATTR_FILL_COLOR, DEFAULT_FILL_COLOR);

    style
}

/// An in-memory [`AttributeSource`].
#[derive(Debug, Default)]
pub struct AttributeMap {
    values: FxHashMap<String, String>,
    density: ScaleFactor,
    released: Cell<usize>,
}

impl AttributeMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_density(mut self, density: impl Into<ScaleFactor>) -> Self {
        self.density = density.into();
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Parses whitespace separated `name="value"` declarations.
    ///
    /// Values may be unquoted if they contain no whitespace. A namespace
    /// prefix on the name (`app:corner_radius`) is ignored.
    pub fn parse(markup: &str) -> Result<Self, AttributeError> {
        let mut map = Self::new();
        let mut rest = markup.trim_start();

        while !rest.is_empty() {
            let Some(eq) = rest.find('=') else {
                return Err(AttributeError::Malformed(rest.to_string()));
            };
            let name = rest[..eq].trim();
            if name.is_empty() || name.contains(char::is_whitespace) {
                return Err(AttributeError::Malformed(rest.to_string()));
            }
            let name = name.rsplit(':').next().unwrap_or(name);

            let after = rest[eq + 1..].trim_start();
            let (value, remaining) = if let Some(quoted) = after.strip_prefix('"') {
                let Some(end) = quoted.find('"') else {
                    return Err(AttributeError::Malformed(rest.to_string()));
                };
                (&quoted[..end], &quoted[end + 1..])
            } else {
                let end = after.find(char::is_whitespace).unwrap_or(after.len());
                (&after[..end], &after[end..])
            };

            map.set(name, value);
            rest = remaining.trim_start();
        }

        Ok(map)
    }

    /// How many times a styled attribute handle over this map was released.
    pub fn release_count(&self) -> usize {
        self.released.get()
    }
}

impl AttributeSource for AttributeMap {
    fn raw_value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    fn density(&self) -> ScaleFactor {
        self.density
    }

    fn release(&self) {
        self.released.set(self.released.get() + 1);
    }
}
