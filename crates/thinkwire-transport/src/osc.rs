//! OSC transport adapter (sender)
//!
//! Encodes a prompt (or any address + argument list) as a single OSC
//! message and transmits it as one UDP datagram. Fire-and-forget: UDP gives
//! no delivery guarantee and the sender never waits for a reply. Only local
//! socket and encoding failures are observable.

use rosc::{OscMessage, OscPacket, OscType};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thinkwire_core::{Address, Error as CoreError, Prompt, Value};
use tokio::net::UdpSocket;
use tracing::debug;

use crate::error::{Result, TransportError};

/// OSC sender configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OscSenderConfig {
    /// Remote host:port datagrams are sent to
    #[serde(default = "default_target")]
    pub target: String,
}

fn default_target() -> String {
    format!("127.0.0.1:{}", thinkwire_core::DEFAULT_OSC_PORT)
}

impl Default for OscSenderConfig {
    fn default() -> Self {
        Self {
            target: default_target(),
        }
    }
}

/// UDP sender for OSC messages
pub struct OscSender {
    socket: UdpSocket,
    target: SocketAddr,
}

impl OscSender {
    /// Bind an ephemeral local socket and resolve the target address
    pub async fn connect(config: OscSenderConfig) -> Result<Self> {
        let target: SocketAddr = config
            .target
            .parse()
            .map_err(|e| TransportError::InvalidTarget(format!("{}: {}", config.target, e)))?;

        let socket = UdpSocket::bind("0.0.0.0:0")
            .await
            .map_err(|e| TransportError::BindFailed(e.to_string()))?;

        Ok(Self { socket, target })
    }

    /// Target address datagrams are sent to
    pub fn target(&self) -> SocketAddr {
        self.target
    }

    /// Encode and send one OSC message
    pub async fn send(&self, address: &str, args: Vec<Value>) -> Result<()> {
        let address = Address::parse(address)?;

        let msg = OscMessage {
            addr: address.as_str().to_string(),
            args: args.iter().map(value_to_osc).collect(),
        };

        let bytes = rosc::encoder::encode(&OscPacket::Message(msg))
            .map_err(|e| CoreError::Encode(e.to_string()))?;

        self.socket
            .send_to(&bytes, self.target)
            .await
            .map_err(|e| TransportError::SendFailed(e.to_string()))?;

        debug!("sent {} ({} bytes) to {}", address, bytes.len(), self.target);
        Ok(())
    }

    /// Send a prompt to `/think` as a single string argument
    pub async fn send_prompt(&self, prompt: &Prompt) -> Result<()> {
        self.send(
            thinkwire_core::THINK_ADDRESS,
            vec![Value::String(prompt.as_str().to_string())],
        )
        .await
    }
}

/// Convert a value to its OSC argument representation
pub fn value_to_osc(value: &Value) -> OscType {
    match value {
        Value::Null => OscType::Nil,
        Value::Bool(b) => OscType::Bool(*b),
        Value::Int(i) => {
            if *i >= i32::MIN as i64 && *i <= i32::MAX as i64 {
                OscType::Int(*i as i32)
            } else {
                OscType::Long(*i)
            }
        }
        Value::Float(f) => OscType::Double(*f),
        Value::String(s) => OscType::String(s.clone()),
        Value::Bytes(b) => OscType::Blob(b.clone()),
        Value::Array(arr) => OscType::Array(rosc::OscArray {
            content: arr.iter().map(value_to_osc).collect(),
        }),
    }
}

/// Convert an OSC argument to a value
pub fn osc_to_value(arg: &OscType) -> Value {
    match arg {
        OscType::Int(i) => Value::Int(*i as i64),
        OscType::Float(f) => Value::Float(*f as f64),
        OscType::String(s) => Value::String(s.clone()),
        OscType::Blob(b) => Value::Bytes(b.clone()),
        OscType::Time(_) => Value::Null, // time tags have no value mapping
        OscType::Long(l) => Value::Int(*l),
        OscType::Double(d) => Value::Float(*d),
        OscType::Char(c) => Value::String(c.to_string()),
        OscType::Color(c) => Value::Array(vec![
            Value::Int(c.red as i64),
            Value::Int(c.green as i64),
            Value::Int(c.blue as i64),
            Value::Int(c.alpha as i64),
        ]),
        OscType::Midi(m) => Value::Array(vec![
            Value::Int(m.port as i64),
            Value::Int(m.status as i64),
            Value::Int(m.data1 as i64),
            Value::Int(m.data2 as i64),
        ]),
        OscType::Bool(b) => Value::Bool(*b),
        OscType::Nil => Value::Null,
        OscType::Inf => Value::Float(f64::INFINITY),
        OscType::Array(arr) => Value::Array(arr.content.iter().map(osc_to_value).collect()),
    }
}
