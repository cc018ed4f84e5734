//! Error types for the drawing surface.

use thiserror::Error;

/// Errors raised by the drawing surface and its raster.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("Drawing surface is not mounted")]
    NotMounted,
    #[error("Invalid raster dimensions: {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },
    #[error("PNG encoding failed: {0}")]
    PngEncoding(#[from] png::EncodingError),
    #[error("Invalid settings: {0}")]
    Settings(#[from] serde_json::Error),
}

/// Result type for surface operations.
pub type SurfaceResult<T> = Result<T, SurfaceError>;
