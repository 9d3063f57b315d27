use crate::mask::CoverageMask;

/// Builds a normalized 1D gaussian kernel covering `ceil(3 * sigma)`
/// pixels on each side of the center tap.
fn gaussian_kernel(sigma: f32) -> Vec<f32> {
    let radius = (sigma * 3.0).ceil() as usize;
    let denom = 2.0 * sigma * sigma;

    let mut kernel: Vec<f32> = (0..=radius * 2)
        .map(|i| {
            let x = i as f32 - radius as f32;
            (-(x * x) / denom).exp()
        })
        .collect();

    let sum: f32 = kernel.iter().sum();
    for w in kernel.iter_mut() {
        *w /= sum;
    }

    kernel
}

/// Convolves `src` along one axis. Samples outside the buffer count as
/// zero coverage.
fn convolve(
    src: &[f32],
    dst: &mut [f32],
    width: usize,
    height: usize,
    kernel: &[f32],
    horizontal: bool,
) {
    let radius = (kernel.len() / 2) as isize;
    let (len, lines) = if horizontal {
        (width, height)
    } else {
        (height, width)
    };
    let index = |line: usize, i: usize| {
        if horizontal {
            line * width + i
        } else {
            i * width + line
        }
    };

    for line in 0..lines {
        for i in 0..len {
            let mut acc = 0.0;
            for (k, w) in kernel.iter().enumerate() {
                let j = i as isize + k as isize - radius;
                if j < 0 || j >= len as isize {
                    continue;
                }
                acc += src[index(line, j as usize)] * w;
            }
            dst[index(line, i)] = acc;
        }
    }
}

/// Applies a separable gaussian blur with standard deviation `sigma` to
/// a coverage mask. A non-positive `sigma` returns an unmodified copy.
pub fn gaussian_blur_mask(mask: &CoverageMask, sigma: f32) -> CoverageMask {
    if sigma.is_nan() || sigma <= 0.0 {
        return mask.clone();
    }

    let size = mask.size();
    let width = size.width as usize;
    let height = size.height as usize;
    let kernel = gaussian_kernel(sigma);

    log::trace!(
        "blurring {}x{} mask with sigma {sigma} ({} taps)",
        width,
        height,
        kernel.len()
    );

    let mut scratch = vec![0.0; width * height];
    let mut out = vec![0.0; width * height];
    convolve(mask.data(), &mut scratch, width, height, &kernel, true);
    convolve(&scratch, &mut out, width, height, &kernel, false);

    CoverageMask::from_raw(size, out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mask::render_shape_mask;
    use crate::radius::Radius;
    use softshadow_core::math::{point, Box2D, PhysicalSizeU32};

    #[test]
    fn kernel_is_normalized_and_symmetric() {
        let kernel = gaussian_kernel(2.0);
        assert_eq!(kernel.len(), 13);

        let sum: f32 = kernel.iter().sum();
        assert!((sum - 1.0).abs() < 1e-5);
        assert_eq!(kernel[0], kernel[12]);
        assert!(kernel[6] > kernel[5]);
    }

    #[test]
    fn blur_spreads_coverage_outside_the_shape() {
        let size = PhysicalSizeU32::new(40, 40);
        let mask = render_shape_mask(
            size,
            Box2D::new(point(10.0, 10.0), point(30.0, 30.0)),
            Radius::ZERO,
        );
        let blurred = gaussian_blur_mask(&mask, 3.0);

        assert_eq!(mask.get(5, 20), Some(0.0));
        assert!(blurred.get(5, 20).unwrap() > 0.0);
        assert!(blurred.get(20, 20).unwrap() > 0.95);

        // Far corners stay empty once past the kernel's reach.
        assert_eq!(blurred.get(0, 0), Some(0.0));
    }

    #[test]
    fn zero_sigma_is_identity() {
        let mask = render_shape_mask(
            PhysicalSizeU32::new(8, 8),
            Box2D::new(point(2.0, 2.0), point(6.0, 6.0)),
            Radius::ZERO,
        );
        assert_eq!(gaussian_blur_mask(&mask, 0.0), mask);
    }
}
