//! Error types for audio-sync
//!
//! Defines module-specific error types using thiserror for clear error propagation.
//!
//! Most failure modes of the synchronization core are deliberately *not*
//! errors: an unready resource, a rejected play request, or a premature
//! position write all degrade to "no sound" or "stale position" so that
//! frame production is never interrupted. Only caller-contract violations
//! and configuration loading surface as `Err`.

use thiserror::Error;

/// Main error type for the audio-sync crate
#[derive(Error, Debug)]
pub enum Error {
    /// Source key precondition violated (e.g. empty source URL)
    #[error("Invalid source: {0}")]
    InvalidSource(String),

    /// Configuration file loading errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("File I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type using audio-sync Error
pub type Result<T> = std::result::Result<T, Error>;
