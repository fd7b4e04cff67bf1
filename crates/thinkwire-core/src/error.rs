//! Error types for thinkwire

use thiserror::Error;

/// Result type alias for core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Encoding-level errors shared by the transports
#[derive(Error, Debug)]
pub enum Error {
    /// Prompt text was empty or whitespace only
    #[error("prompt must not be empty")]
    EmptyPrompt,

    /// Invalid address format
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// Address pattern compilation error
    #[error("invalid pattern: {0}")]
    InvalidPattern(String),

    /// OSC message encoding error
    #[error("encode error: {0}")]
    Encode(String),

    /// OSC packet decoding error
    #[error("decode error: {0}")]
    Decode(String),
}
