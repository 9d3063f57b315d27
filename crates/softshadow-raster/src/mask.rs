use softshadow_core::math::{Box2D, PhysicalSizeU32};

use crate::radius::Radius;

/// A single-channel coverage buffer with values in `[0.0, 1.0]`.
#[derive(Debug, Clone, PartialEq)]
pub struct CoverageMask {
    size: PhysicalSizeU32,
    data: Vec<f32>,
}

impl CoverageMask {
    pub fn new(size: PhysicalSizeU32) -> Self {
        Self {
            size,
            data: vec![0.0; size.width as usize * size.height as usize],
        }
    }

    pub fn size(&self) -> PhysicalSizeU32 {
        self.size
    }

    pub fn data(&self) -> &[f32] {
        &self.data
    }

    pub fn get(&self, x: u32, y: u32) -> Option<f32> {
        if x >= self.size.width || y >= self.size.height {
            return None;
        }
        self.data
            .get(y as usize * self.size.width as usize + x as usize)
            .copied()
    }

    pub(crate) fn from_raw(size: PhysicalSizeU32, data: Vec<f32>) -> Self {
        debug_assert_eq!(data.len(), size.width as usize * size.height as usize);
        Self { size, data }
    }
}

/// Signed distance from `(px, py)` to the edge of a rounded box. Negative
/// inside the shape.
#[inline]
fn rounded_box_sdf(px: f32, py: f32, shape: &Box2D, radius: &Radius) -> f32 {
    let center = shape.center();
    let half_w = shape.width() * 0.5;
    let half_h = shape.height() * 0.5;

    let qx = px - center.x;
    let qy = py - center.y;

    let r = radius.for_quadrant(qx, qy);

    let dx = qx.abs() - half_w + r;
    let dy = qy.abs() - half_h + r;

    let outside = dx.max(0.0).hypot(dy.max(0.0));
    let inside = dx.max(dy).min(0.0);

    outside + inside - r
}

/// Rasterizes an anti-aliased rounded rectangle into a coverage mask of
/// `size` pixels.
///
/// Coverage is sampled at pixel centers, so a shape whose edges lie on
/// whole pixels produces fully covered or fully empty pixels along
/// straight edges. Corner radii are clamped to half of the shorter side.
pub fn render_shape_mask(size: PhysicalSizeU32, shape: Box2D, radius: Radius) -> CoverageMask {
    let mut mask = CoverageMask::new(size);

    if shape.is_empty() {
        return mask;
    }

    let radius = radius.clamped(shape.width().min(shape.height()) * 0.5);
    let width = size.width as usize;

    // Only the pixels that can touch the shape need evaluating.
    let x0 = shape.min.x.floor().max(0.0) as usize;
    let y0 = shape.min.y.floor().max(0.0) as usize;
    let x1 = (shape.max.x.ceil().max(0.0) as usize).min(width);
    let y1 = (shape.max.y.ceil().max(0.0) as usize).min(size.height as usize);

    for y in y0..y1 {
        let py = y as f32 + 0.5;
        let row = &mut mask.data[y * width..(y + 1) * width];
        for (x, coverage) in row.iter_mut().enumerate().take(x1).skip(x0) {
            let px = x as f32 + 0.5;
            let d = rounded_box_sdf(px, py, &shape, &radius);
            *coverage = (0.5 - d).clamp(0.0, 1.0);
        }
    }

    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use softshadow_core::math::point;

    fn scenario_mask() -> CoverageMask {
        render_shape_mask(
            PhysicalSizeU32::new(120, 70),
            Box2D::new(point(10.0, 10.0), point(110.0, 60.0)),
            Radius::all_same(4.0),
        )
    }

    #[test]
    fn straight_edges_land_on_whole_pixels() {
        let mask = scenario_mask();

        assert_eq!(mask.get(10, 35), Some(1.0));
        assert_eq!(mask.get(9, 35), Some(0.0));
        assert_eq!(mask.get(109, 35), Some(1.0));
        assert_eq!(mask.get(110, 35), Some(0.0));
        assert_eq!(mask.get(60, 10), Some(1.0));
        assert_eq!(mask.get(60, 9), Some(0.0));
        assert_eq!(mask.get(60, 59), Some(1.0));
        assert_eq!(mask.get(60, 60), Some(0.0));
    }

    #[test]
    fn corners_are_rounded() {
        let mask = scenario_mask();

        assert_eq!(mask.get(10, 10), Some(0.0));
        assert_eq!(mask.get(109, 59), Some(0.0));

        let partial = mask.get(11, 11).unwrap();
        assert!(partial > 0.0 && partial < 1.0, "{partial}");

        assert_eq!(mask.get(14, 14), Some(1.0));
    }

    #[test]
    fn out_of_bounds_shape_is_clipped() {
        let mask = render_shape_mask(
            PhysicalSizeU32::new(8, 8),
            Box2D::new(point(-4.0, -4.0), point(4.0, 4.0)),
            Radius::ZERO,
        );

        assert_eq!(mask.get(0, 0), Some(1.0));
        assert_eq!(mask.get(3, 3), Some(1.0));
        assert_eq!(mask.get(4, 4), Some(0.0));
        assert_eq!(mask.get(8, 0), None);
    }
}
