#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("cannot render a shadow for a non-positive extent ({width}x{height})")]
    InvalidExtent { width: i32, height: i32 },

    #[error("shadow raster of {width}x{height} pixels exceeds the supported size")]
    RasterTooLarge { width: u64, height: u64 },
}
