use thiserror::Error;
use std::io;
use std::path::PathBuf;

/// Custom error types for the coloring page generator
#[derive(Error, Debug)]
pub enum ColoringPageError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Failed to load the image: {0}")]
    Load(String),

    #[error("Failed to generate coloring page: {0}")]
    Processing(String),

    #[error("Failed to perform flood fill: {0}")]
    Fill(String),

    #[error("Failed to save the image: {0}")]
    Save(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration from {path}: {source}")]
    ConfigLoad {
        source: toml::de::Error,
        path: PathBuf,
    },

    #[error("Invalid input path: {0}")]
    InvalidPath(PathBuf),

    #[error("Window error: {0}")]
    Window(String),
}

/// Type alias for Result with our custom error type
pub type Result<T> = std::result::Result<T, ColoringPageError>;
