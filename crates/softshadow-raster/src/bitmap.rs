use image::RgbaImage;
use softshadow_core::color::RGBA8;
use softshadow_core::math::PhysicalSizeU32;

/// A rendered shape-with-shadow raster in straight (non-premultiplied)
/// RGBA8.
#[derive(Debug, Clone, PartialEq)]
pub struct ShadowBitmap {
    image: RgbaImage,
}

impl ShadowBitmap {
    pub(crate) fn new(image: RgbaImage) -> Self {
        Self { image }
    }

    pub fn size(&self) -> PhysicalSizeU32 {
        let (width, height) = self.image.dimensions();
        PhysicalSizeU32::new(width, height)
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// The pixel at `(x, y)`, or `None` if it lies outside the bitmap.
    pub fn pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        self.image.get_pixel_checked(x, y).map(|p| {
            let [r, g, b, a] = p.0;
            RGBA8 { r, g, b, a }
        })
    }

    pub fn image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }
}

impl From<ShadowBitmap> for RgbaImage {
    fn from(b: ShadowBitmap) -> Self {
        b.image
    }
}
