//! Error types for the relay core.
//!
//! [`RelayError`] is the top-level error shared by the transport, dispatcher and application layers.

use thiserror::Error;

/// Top-level error for the relay (bot transport, config).
#[derive(Error, Debug)]
pub enum RelayError {
    #[error("Bot error: {0}")]
    Bot(String),

    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for core operations; uses [`RelayError`].
pub type Result<T> = std::result::Result<T, RelayError>;
