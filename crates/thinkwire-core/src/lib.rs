//! Thinkwire Core
//!
//! Shared types for the thinkwire transports:
//! - Prompt text sent to the think service ([`Prompt`])
//! - OSC-style addresses and wildcard patterns ([`Address`], [`Pattern`])
//! - Argument values carried in OSC messages ([`Value`])
//!
//! This crate does no I/O; the transport adapters live in
//! `thinkwire-transport`.

pub mod address;
pub mod error;
pub mod prompt;
pub mod value;

pub use address::{Address, Pattern};
pub use error::{Error, Result};
pub use prompt::Prompt;
pub use value::Value;

/// Default HTTP endpoint of the think service
pub const DEFAULT_THINK_ENDPOINT: &str = "http://localhost:3001/think";

/// Default UDP port for OSC senders and listeners
pub const DEFAULT_OSC_PORT: u16 = 8000;

/// OSC address prompts are sent to
pub const THINK_ADDRESS: &str = "/think";
