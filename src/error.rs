use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image decoding error: {0}")]
    Decode(#[from] image::ImageError),

    #[error("WebP encoding error: {0}")]
    WebpEncode(String),

    #[error("Image container error: {0}")]
    Container(#[from] img_parts::Error),

    #[error("Invalid quality value: {0}. Must be between 0 and 100")]
    InvalidQuality(u8),

    #[error("Invalid target size: {0}x{1}. Width and height must be positive")]
    InvalidTargetSize(u32, u32),

    #[error("Input directory not found: {0}")]
    InputDirNotFound(PathBuf),

    #[error("Failed to create output directory: {0}")]
    DirectoryCreationFailed(PathBuf),
}

pub type Result<T> = std::result::Result<T, ConversionError>;
