use thiserror::Error;

/// Library error type for readable-color operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The requested region cannot yield pixel data (empty or off-surface).
    #[error("invalid background content: {0}")]
    InvalidBackgroundContent(String),

    /// Text that does not parse as a hex color.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// Text that does not parse as an `X,Y,W,H` region.
    #[error("invalid region: {0}")]
    InvalidRegion(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// YAML/serde configuration error.
    #[error(transparent)]
    Config(#[from] serde_yaml::Error),

    /// Image decode error.
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
