//! Connection layer for the Rochambet client.
//!
//! Provides the [`Connector`] and [`Connection`] traits that abstract over
//! how the client reaches the game server. The live implementation is
//! WebSocket ([`WebSocketConnector`]); tests drive the protocol handler with
//! in-memory fakes behind the same seam.
//!
//! The challenge protocol replaces its socket after every resolved round, so
//! a [`Connector`] is a *factory* the handler dials repeatedly — not a handle
//! to a single long-lived connection.
//!
//! # Feature Flags
//!
//! - `websocket` (default) — WebSocket connector via `tokio-tungstenite`

#![allow(async_fn_in_trait)]

mod error;
#[cfg(feature = "websocket")]
mod websocket;

pub use error::TransportError;
#[cfg(feature = "websocket")]
pub use websocket::{WebSocketConnection, WebSocketConnector};

use std::fmt;

/// Opaque identifier for one physical connection.
///
/// Connection-per-round means several connections exist over a session's
/// lifetime; the id makes each one traceable in logs so the replacement
/// lifecycle stays auditable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ConnectionId(u64);

impl ConnectionId {
    /// Creates a new `ConnectionId` from a raw `u64`.
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Returns the underlying `u64` value.
    pub fn into_inner(self) -> u64 {
        self.0
    }
}

impl fmt::Display for ConnectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "conn-{}", self.0)
    }
}

/// Dials new outbound connections to one endpoint.
pub trait Connector: Send + Sync + 'static {
    /// The connection type produced by this connector.
    type Connection: Connection;

    /// Opens a fresh connection to the endpoint.
    async fn connect(&self) -> Result<Self::Connection, TransportError>;
}

/// A single live connection that can send and receive frames.
///
/// Connections are single-owner: the protocol handler holds exactly one at
/// a time and drops it on replacement or teardown, so methods take
/// `&mut self` rather than hiding a lock.
pub trait Connection: Send + 'static {
    /// Sends one frame to the server.
    async fn send(&mut self, data: &[u8]) -> Result<(), TransportError>;

    /// Receives the next frame from the server.
    ///
    /// Returns `Ok(None)` when the connection is cleanly closed.
    async fn recv(&mut self) -> Result<Option<Vec<u8>>, TransportError>;

    /// Closes the connection.
    async fn close(&mut self) -> Result<(), TransportError>;

    /// Returns the unique identifier for this connection.
    fn id(&self) -> ConnectionId;
}
