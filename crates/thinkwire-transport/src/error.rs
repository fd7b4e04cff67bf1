//! Transport error types

use thiserror::Error;

pub type Result<T> = std::result::Result<T, TransportError>;

#[derive(Error, Debug)]
pub enum TransportError {
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("invalid target: {0}")]
    InvalidTarget(String),

    #[error("request failed: {0}")]
    Request(String),

    #[error("unexpected status: {code}")]
    Status { code: u16 },

    #[error("malformed response: {0}")]
    MalformedResponse(String),

    #[error("bind failed: {0}")]
    BindFailed(String),

    #[error("send failed: {0}")]
    SendFailed(String),

    #[error("listener stopped")]
    Stopped,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("encoding error: {0}")]
    Encoding(#[from] thinkwire_core::Error),
}
