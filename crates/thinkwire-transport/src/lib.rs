//! Thinkwire Transport Layer
//!
//! Two ways to deliver a prompt to a think service:
//! - HTTP: one POST with a JSON body, returns the decoded reply ([`HttpThinkClient`])
//! - OSC over UDP: one datagram, fire-and-forget ([`OscSender`])
//!
//! plus the receiving counterpart, [`OscListener`], which routes incoming
//! OSC messages through a [`Dispatcher`] of pattern-keyed handlers.

pub mod error;
pub mod http;
pub mod listener;
pub mod osc;

pub use error::{Result, TransportError};
pub use http::{HttpConfig, HttpThinkClient};
pub use listener::{Dispatcher, ListenerHandle, ListenerState, OscListener, OscListenerConfig};
pub use osc::{OscSender, OscSenderConfig};
