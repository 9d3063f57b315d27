mod bitmap;
mod blur;
mod error;
mod mask;
mod radius;
mod render;
mod shadow;
mod style;

pub use bitmap::ShadowBitmap;
pub use blur::gaussian_blur_mask;
pub use error::RenderError;
pub use mask::{render_shape_mask, CoverageMask};
pub use radius::{radius, Radius};
pub use render::{raster_size, render, RenderMode, MAX_RASTER_PIXELS};
pub use shadow::{blur_sigma, shadow_bleed, shadow_margin, Shadow};
pub use style::{
    ShadowStyle, ShadowStyleBuilder, DEFAULT_CORNER_RADIUS, DEFAULT_FILL_COLOR,
    DEFAULT_SHADOW_COLOR, DEFAULT_SHADOW_RADIUS,
};
