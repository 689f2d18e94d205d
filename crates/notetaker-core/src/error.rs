//! Error types for notetaker-core

use thiserror::Error;

use crate::remote::RemoteError;

/// Result type alias using notetaker-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in notetaker-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Invalid backend configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Remote note store error
    #[error(transparent)]
    Remote(#[from] RemoteError),
}
