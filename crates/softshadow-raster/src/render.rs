use image::RgbaImage;
use softshadow_core::color::PremulRgba;
use softshadow_core::math::{point, Box2D, PhysicalSizeU32, SizeI32};

use crate::bitmap::ShadowBitmap;
use crate::blur::gaussian_blur_mask;
use crate::error::RenderError;
use crate::mask::render_shape_mask;
use crate::shadow::{blur_sigma, shadow_bleed};
use crate::style::ShadowStyle;

/// Upper bound on the number of pixels in a single shadow raster.
pub const MAX_RASTER_PIXELS: u64 = 1 << 28;

/// Whether the host is drawing live content or a design-time preview.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RenderMode {
    #[default]
    Interactive,
    /// Offscreen shadow rendering may be unavailable here, so only the
    /// flat shape is drawn.
    Preview,
}

impl RenderMode {
    pub fn draws_shadow(&self) -> bool {
        matches!(self, RenderMode::Interactive)
    }
}

/// The size of the raster produced for a content `extent`: the extent
/// plus the shadow bleed on both axes.
pub fn raster_size(extent: SizeI32, style: &ShadowStyle) -> Result<PhysicalSizeU32, RenderError> {
    if extent.width <= 0 || extent.height <= 0 {
        return Err(RenderError::InvalidExtent {
            width: extent.width,
            height: extent.height,
        });
    }

    let bleed = u64::from(shadow_bleed(style.shadow.blur_radius));
    let width = extent.width as u64 + bleed;
    let height = extent.height as u64 + bleed;

    if width > u64::from(u32::MAX)
        || height > u64::from(u32::MAX)
        || width * height > MAX_RASTER_PIXELS
    {
        return Err(RenderError::RasterTooLarge { width, height });
    }

    Ok(PhysicalSizeU32::new(width as u32, height as u32))
}

/// Renders a filled rounded rectangle with a soft drop shadow, padded so
/// the blur is not clipped.
///
/// The raster measures `extent + 2 * shadow_radius` on each axis. The shape
/// covers exactly `extent`, inset by the shadow radius on every side. The
/// shadow is a gaussian-blurred copy of the shape, shifted by the shadow
/// offset and drawn beneath it. In [`RenderMode::Preview`] the shadow is
/// skipped and only the flat shape is drawn. Everything outside the shape
/// and its shadow is transparent.
///
/// The output depends only on the inputs.
pub fn render(
    extent: SizeI32,
    style: &ShadowStyle,
    mode: RenderMode,
) -> Result<ShadowBitmap, RenderError> {
    let style = style.sanitized();
    let size = raster_size(extent, &style)?;
    let shadow_radius = style.shadow.blur_radius;

    log::trace!(
        "rendering {}x{} shadow raster for {}x{} extent ({mode:?})",
        size.width,
        size.height,
        extent.width,
        extent.height
    );

    let shape = Box2D::new(
        point(shadow_radius, shadow_radius),
        point(
            size.width as f32 - shadow_radius,
            size.height as f32 - shadow_radius,
        ),
    );

    let mut pixels = vec![PremulRgba::TRANSPARENT; size.width as usize * size.height as usize];

    let shadow = style.shadow;
    if mode.draws_shadow() && shadow_radius > 0.0 && shadow.color.a > 0 {
        let mask = render_shape_mask(size, shape.translate(shadow.offset), style.corner_radius);
        let blurred = gaussian_blur_mask(&mask, blur_sigma(shadow_radius));
        let color = PremulRgba::from(shadow.color);

        for (px, coverage) in pixels.iter_mut().zip(blurred.data()) {
            *px = color.scaled(*coverage);
        }
    }

    let fill_mask = render_shape_mask(size, shape, style.corner_radius);
    let fill = PremulRgba::from(style.fill_color);
    for (px, coverage) in pixels.iter_mut().zip(fill_mask.data()) {
        if *coverage > 0.0 {
            *px = fill.scaled(*coverage).over(*px);
        }
    }

    let mut image = RgbaImage::new(size.width, size.height);
    for (dst, src) in image.pixels_mut().zip(pixels.iter()) {
        let c = src.to_rgba8();
        dst.0 = [c.r, c.g, c.b, c.a];
    }

    Ok(ShadowBitmap::new(image))
}

#[cfg(test)]
mod tests {
    use super::*;
    use softshadow_core::color::{GREEN, TRANSPARENT};
    use softshadow_core::math::vector;

    fn scenario_style() -> ShadowStyle {
        ShadowStyle::builder()
            .corner_radius(4.0)
            .shadow_radius(10.0)
            .build()
    }

    #[test]
    fn raster_is_extent_plus_bleed() {
        let bitmap = render(
            SizeI32::new(100, 50),
            &scenario_style(),
            RenderMode::Interactive,
        )
        .unwrap();
        assert_eq!(bitmap.size(), PhysicalSizeU32::new(120, 70));

        let bitmap = render(SizeI32::new(1, 1), &scenario_style(), RenderMode::Preview).unwrap();
        assert_eq!(bitmap.size(), PhysicalSizeU32::new(21, 21));
    }

    #[test]
    fn non_positive_extent_is_rejected() {
        for extent in [SizeI32::new(0, 10), SizeI32::new(10, 0), SizeI32::new(-5, 5)] {
            assert_eq!(
                render(extent, &scenario_style(), RenderMode::Interactive),
                Err(RenderError::InvalidExtent {
                    width: extent.width,
                    height: extent.height
                })
            );
        }
    }

    #[test]
    fn oversized_raster_is_rejected() {
        let err = raster_size(SizeI32::new(i32::MAX, i32::MAX), &scenario_style()).unwrap_err();
        assert!(matches!(err, RenderError::RasterTooLarge { .. }));
    }

    #[test]
    fn preview_draws_only_the_flat_shape() {
        let bitmap = render(SizeI32::new(100, 50), &scenario_style(), RenderMode::Preview).unwrap();

        assert_eq!(bitmap.pixel(60, 35), Some(GREEN));
        assert_eq!(bitmap.pixel(5, 35), Some(TRANSPARENT));
        assert_eq!(bitmap.pixel(9, 35), Some(TRANSPARENT));
        assert_eq!(bitmap.pixel(10, 35), Some(GREEN));
        assert_eq!(bitmap.pixel(109, 35), Some(GREEN));
        assert_eq!(bitmap.pixel(110, 35), Some(TRANSPARENT));
        assert_eq!(bitmap.pixel(10, 10), Some(TRANSPARENT));
    }

    #[test]
    fn interactive_mode_bleeds_shadow_outside_the_shape() {
        let bitmap = render(
            SizeI32::new(100, 50),
            &scenario_style(),
            RenderMode::Interactive,
        )
        .unwrap();

        let bleed = bitmap.pixel(5, 35).unwrap();
        assert!(bleed.a > 0);
        assert_eq!((bleed.g, bleed.b), (0, 0));
        assert_eq!(bitmap.pixel(60, 35), Some(GREEN));
    }

    #[test]
    fn shadow_follows_offset() {
        let style = ShadowStyle::builder()
            .shadow_radius(4.0)
            .shadow_offset(vector(6.0, 0.0))
            .build();
        let bitmap = render(SizeI32::new(40, 20), &style, RenderMode::Interactive).unwrap();

        let left = bitmap.pixel(2, 14).unwrap();
        let right = bitmap.pixel(45, 14).unwrap();
        assert!(right.a > left.a, "left {left:?} right {right:?}");
    }

    #[test]
    fn transparent_shadow_color_draws_no_shadow() {
        let style = ShadowStyle::builder().shadow_color(TRANSPARENT).build();
        let bitmap = render(SizeI32::new(30, 30), &style, RenderMode::Interactive).unwrap();
        assert_eq!(bitmap.pixel(5, 25), Some(TRANSPARENT));
    }

    #[test]
    fn rendering_is_deterministic() {
        let style = ShadowStyle::builder()
            .corner_radius(7.5)
            .shadow_radius(6.0)
            .shadow_offset(vector(2.0, 3.0))
            .build();
        let a = render(SizeI32::new(64, 33), &style, RenderMode::Interactive).unwrap();
        let b = render(SizeI32::new(64, 33), &style, RenderMode::Interactive).unwrap();
        assert_eq!(a, b);
    }
}
