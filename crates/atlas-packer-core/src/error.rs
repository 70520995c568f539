use thiserror::Error;

#[derive(Debug, Error)]
pub enum AtlasError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("nothing to pack")]
    Empty,
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("invalid config: {0}")]
    InvalidConfig(String),
    #[error(
        "cannot fit images into a {max_dimension}x{max_dimension} sheet: {fit} of {attempted} placed"
    )]
    OutOfSpace {
        attempted: usize,
        fit: usize,
        max_dimension: u32,
    },
    #[error("packing cancelled")]
    Cancelled,
}

pub type Result<T> = std::result::Result<T, AtlasError>;
