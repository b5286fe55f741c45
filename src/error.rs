//! Error types shared across the scanner, player and storage layers

use thiserror::Error;

/// Why a barcode string was rejected by the validator
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// Fewer than two characters
    #[error("Barcode data is too short")]
    TooShort,

    /// At least one character outside printable ASCII (32..=126)
    #[error("Barcode contains invalid characters")]
    InvalidCharacters,
}

/// Failure to open the capture device
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Camera unavailable: {0}")]
    Unavailable(String),
}

/// Storage read/write failures
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed stored data for '{key}': {source}")]
    Parse {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Could not encode data for '{key}': {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}
