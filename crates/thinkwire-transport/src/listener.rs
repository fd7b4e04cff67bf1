//! OSC listener
//!
//! Receives OSC datagrams on a bound UDP socket and routes each decoded
//! message through a [`Dispatcher`] of (pattern, handler) routes.
//!
//! The listener moves through four states:
//!
//! ```text
//! Idle -> Bound -> Serving -> Stopped
//! ```
//!
//! [`OscListener::bind`] takes it from Idle to Bound, [`OscListener::serve`]
//! enters the receive loop, and [`ListenerHandle::stop`] ends it. Stopped is
//! terminal: the socket is released before `serve` returns and the listener
//! cannot be re-entered.
//!
//! Handlers run synchronously on the receive loop, one datagram processed to
//! completion before the next is read. A datagram that fails to decode is
//! logged and skipped; the loop continues.

use rosc::OscPacket;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use thinkwire_core::{Pattern, Result as CoreResult, Value};
use tokio::net::UdpSocket;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::error::{Result, TransportError};
use crate::osc::osc_to_value;

/// Handler invoked with the message address and decoded arguments
pub type Handler = Box<dyn Fn(&str, &[Value]) + Send + Sync>;

/// Ordered table of (pattern, handler) routes
#[derive(Default)]
pub struct Dispatcher {
    routes: Vec<(Pattern, Handler)>,
}

impl Dispatcher {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Register a handler for an address pattern.
    ///
    /// `*` matches one segment and `**` matches any number, so `/*` catches
    /// every single-segment address such as `/think`.
    pub fn map<F>(&mut self, pattern: &str, handler: F) -> CoreResult<()>
    where
        F: Fn(&str, &[Value]) + Send + Sync + 'static,
    {
        let pattern = Pattern::compile(pattern)?;
        self.routes.push((pattern, Box::new(handler)));
        Ok(())
    }

    /// Route one message to the first matching handler.
    ///
    /// Returns false when no route matched.
    pub fn dispatch(&self, address: &str, args: &[Value]) -> bool {
        for (pattern, handler) in &self.routes {
            if pattern.matches(address) {
                handler(address, args);
                return true;
            }
        }
        false
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}

/// Listener configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OscListenerConfig {
    /// Local address to bind
    #[serde(default = "default_bind")]
    pub bind_addr: String,
}

fn default_bind() -> String {
    format!("0.0.0.0:{}", thinkwire_core::DEFAULT_OSC_PORT)
}

impl Default for OscListenerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind(),
        }
    }
}

/// Listener lifecycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    /// No socket yet
    Idle,
    /// Socket bound, not yet receiving
    Bound,
    /// Receive loop running
    Serving,
    /// Terminal; socket released
    Stopped,
}

/// Handle for stopping a listener from another task
#[derive(Clone)]
pub struct ListenerHandle {
    shutdown_tx: mpsc::Sender<()>,
}

impl ListenerHandle {
    /// Request the receive loop to stop
    pub async fn stop(&self) {
        let _ = self.shutdown_tx.send(()).await;
    }
}

/// UDP server routing OSC messages to registered handlers
pub struct OscListener {
    socket: Option<UdpSocket>,
    dispatcher: Dispatcher,
    state: ListenerState,
    shutdown_tx: mpsc::Sender<()>,
    shutdown_rx: mpsc::Receiver<()>,
}

impl OscListener {
    /// Bind the UDP socket: Idle -> Bound
    pub async fn bind(config: OscListenerConfig, dispatcher: Dispatcher) -> Result<Self> {
        let socket = UdpSocket::bind(&config.bind_addr)
            .await
            .map_err(|e| TransportError::BindFailed(format!("{}: {}", config.bind_addr, e)))?;

        info!("OSC listener bound to {}", socket.local_addr()?);

        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        Ok(Self {
            socket: Some(socket),
            dispatcher,
            state: ListenerState::Bound,
            shutdown_tx,
            shutdown_rx,
        })
    }

    /// Local address of the bound socket
    pub fn local_addr(&self) -> Result<SocketAddr> {
        match &self.socket {
            Some(socket) => Ok(socket.local_addr()?),
            None => Err(TransportError::Stopped),
        }
    }

    /// Current lifecycle state
    pub fn state(&self) -> ListenerState {
        self.state
    }

    /// Handle for stopping the listener while `serve` runs
    pub fn handle(&self) -> ListenerHandle {
        ListenerHandle {
            shutdown_tx: self.shutdown_tx.clone(),
        }
    }

    /// Run the receive loop: Bound -> Serving -> Stopped.
    ///
    /// Processes one datagram at a time to completion. Returns after
    /// [`ListenerHandle::stop`], releasing the socket. The listener is then
    /// terminal and a further `serve` call fails with
    /// [`TransportError::Stopped`].
    pub async fn serve(&mut self) -> Result<()> {
        if self.state != ListenerState::Bound {
            return Err(TransportError::Stopped);
        }
        let socket = match &self.socket {
            Some(socket) => socket,
            None => return Err(TransportError::Stopped),
        };

        self.state = ListenerState::Serving;
        info!("OSC listener serving");

        let mut buf = vec![0u8; 65536];

        loop {
            tokio::select! {
                received = socket.recv_from(&mut buf) => {
                    match received {
                        Ok((len, from)) => {
                            handle_datagram(&self.dispatcher, &buf[..len], from);
                        }
                        Err(e) => {
                            warn!("receive error: {}", e);
                        }
                    }
                }
                _ = self.shutdown_rx.recv() => {
                    break;
                }
            }
        }

        // Terminal: drop the socket so the port is free again.
        self.socket = None;
        self.state = ListenerState::Stopped;
        info!("OSC listener stopped");
        Ok(())
    }
}

fn handle_datagram(dispatcher: &Dispatcher, data: &[u8], from: SocketAddr) {
    match rosc::decoder::decode_udp(data) {
        Ok((_, packet)) => handle_packet(dispatcher, packet, from),
        Err(e) => {
            warn!("dropping malformed datagram from {}: {}", from, e);
        }
    }
}

/// Dispatch one packet, flattening bundles in order
fn handle_packet(dispatcher: &Dispatcher, packet: OscPacket, from: SocketAddr) {
    match packet {
        OscPacket::Message(msg) => {
            let args: Vec<Value> = msg.args.iter().map(osc_to_value).collect();
            debug!("OSC {} from {}", msg.addr, from);
            if !dispatcher.dispatch(&msg.addr, &args) {
                debug!("no route for {}", msg.addr);
            }
        }
        OscPacket::Bundle(bundle) => {
            for inner in bundle.content {
                handle_packet(dispatcher, inner, from);
            }
        }
    }
}
