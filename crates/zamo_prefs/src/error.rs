use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by preference store backends.
///
/// Callers in the state managers log these and carry on in memory; nothing
/// here is meant to reach UI code.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("preference file {path} could not be accessed: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("preference file {path} is malformed: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("preferences could not be encoded: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error("preference backend unavailable: {0}")]
    Unavailable(String),
}

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
