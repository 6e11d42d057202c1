use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Custom error type for tunedl
#[derive(Error, Debug)]
pub enum TunedlError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("Provisioning failed: {0}")]
    Provision(String),

    #[error("Input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for tunedl
pub type Result<T> = std::result::Result<T, TunedlError>;

impl TunedlError {
    /// Create a provisioning error
    pub fn provision<S: Into<String>>(msg: S) -> Self {
        TunedlError::Provision(msg.into())
    }

    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        TunedlError::Config(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        TunedlError::Other(msg.into())
    }
}
