//! The lobby: a free-text side channel, separate from the challenge flow.
//!
//! Unlike the challenge connection, the lobby socket is long-lived and
//! carries no structured frames — outbound text goes out verbatim and every
//! inbound line is appended to the lobby's own log verbatim. No token, no
//! wager, no state machine.

use rochambet_session::MessageLog;
use rochambet_transport::{Connection, Connector};

use crate::RochambetError;

/// Plain-text lobby connection.
///
/// Shares the [`Connector`] seam with the challenge client so tests can run
/// it against the same fakes, but keeps its own connection and log.
pub struct LobbyClient<C: Connector> {
    connector: C,
    conn: Option<C::Connection>,
    log: MessageLog,
}

impl<C: Connector> LobbyClient<C> {
    /// Creates a disconnected lobby client.
    pub fn new(connector: C) -> Self {
        Self {
            connector,
            conn: None,
            log: MessageLog::new(),
        }
    }

    /// Dials the lobby endpoint. Replaces any previous connection.
    pub async fn connect(&mut self) -> Result<(), RochambetError> {
        self.close().await;
        let conn = self.connector.connect().await?;
        tracing::debug!(id = %conn.id(), "lobby connection ready");
        self.conn = Some(conn);
        Ok(())
    }

    /// Returns `true` while a connection is held.
    pub fn is_connected(&self) -> bool {
        self.conn.is_some()
    }

    /// Sends one line of free text.
    ///
    /// # Errors
    /// [`RochambetError::State`] when not connected; a transport error if
    /// the send fails (the connection is then dropped).
    pub async fn send_text(&mut self, text: &str) -> Result<(), RochambetError> {
        let Some(conn) = self.conn.as_mut() else {
            return Err(RochambetError::State("lobby is not connected".into()));
        };
        if let Err(e) = conn.send(text.as_bytes()).await {
            self.conn = None;
            return Err(e.into());
        }
        Ok(())
    }

    /// Receives the next inbound line and appends it to the lobby log
    /// verbatim.
    ///
    /// Returns `Ok(None)` when the server closed the connection; the client
    /// is then disconnected and `connect()` starts over.
    pub async fn recv_text(&mut self) -> Result<Option<String>, RochambetError> {
        let Some(conn) = self.conn.as_mut() else {
            return Err(RochambetError::State("lobby is not connected".into()));
        };
        match conn.recv().await {
            Ok(Some(frame)) => {
                let text = String::from_utf8_lossy(&frame).into_owned();
                self.log.push(text.clone());
                Ok(Some(text))
            }
            Ok(None) => {
                self.conn = None;
                Ok(None)
            }
            Err(e) => {
                self.conn = None;
                Err(e.into())
            }
        }
    }

    /// The lobby's own message log, oldest first.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Closes the lobby connection, if any. Idempotent.
    pub async fn close(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            if let Err(e) = conn.close().await {
                tracing::debug!(error = %e, "close failed while leaving lobby");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rochambet_transport::{ConnectionId, TransportError};
    use std::collections::VecDeque;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Wire {
        sent: Mutex<Vec<Vec<u8>>>,
        inbound: Mutex<VecDeque<Vec<u8>>>,
        closes: AtomicUsize,
    }

    #[derive(Clone)]
    struct FakeConnector {
        wire: Arc<Wire>,
    }

    struct FakeConnection {
        wire: Arc<Wire>,
    }

    impl Connector for FakeConnector {
        type Connection = FakeConnection;

        async fn connect(&self) -> Result<FakeConnection, TransportError> {
            Ok(FakeConnection {
                wire: Arc::clone(&self.wire),
            })
        }
    }

    impl Connection for FakeConnection {
        async fn send(&mut self, data: &[u8]) -> Result<(), TransportError> {
            self.wire.sent.lock().unwrap().push(data.to_vec());
            Ok(())
        }

        async fn recv(&mut self) -> Result<Option<Vec<u8>>, TransportError> {
            Ok(self.wire.inbound.lock().unwrap().pop_front())
        }

        async fn close(&mut self) -> Result<(), TransportError> {
            self.wire.closes.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }

        fn id(&self) -> ConnectionId {
            ConnectionId::new(1)
        }
    }

    fn lobby() -> (LobbyClient<FakeConnector>, Arc<Wire>) {
        let wire = Arc::new(Wire::default());
        let client = LobbyClient::new(FakeConnector {
            wire: Arc::clone(&wire),
        });
        (client, wire)
    }

    #[tokio::test]
    async fn test_send_text_goes_out_verbatim() {
        let (mut lobby, wire) = lobby();
        lobby.connect().await.unwrap();

        lobby.send_text("hello all").await.unwrap();

        assert_eq!(wire.sent.lock().unwrap()[0], b"hello all");
    }

    #[tokio::test]
    async fn test_recv_text_appends_to_lobby_log_verbatim() {
        let (mut lobby, wire) = lobby();
        wire.inbound
            .lock()
            .unwrap()
            .push_back(b"bob: anyone up for a round?".to_vec());
        lobby.connect().await.unwrap();

        let line = lobby.recv_text().await.unwrap();

        assert_eq!(line.as_deref(), Some("bob: anyone up for a round?"));
        assert_eq!(lobby.log().entries(), ["bob: anyone up for a round?"]);
    }

    #[tokio::test]
    async fn test_send_before_connect_is_rejected() {
        let (mut lobby, _wire) = lobby();
        let result = lobby.send_text("hi").await;
        assert!(matches!(result, Err(RochambetError::State(_))));
    }

    #[tokio::test]
    async fn test_server_close_disconnects() {
        let (mut lobby, _wire) = lobby();
        lobby.connect().await.unwrap();

        let line = lobby.recv_text().await.unwrap();

        assert_eq!(line, None);
        assert!(!lobby.is_connected());
    }

    #[tokio::test]
    async fn test_close_is_idempotent() {
        let (mut lobby, wire) = lobby();
        lobby.connect().await.unwrap();

        lobby.close().await;
        lobby.close().await;

        assert_eq!(wire.closes.load(Ordering::SeqCst), 1);
        assert!(!lobby.is_connected());
    }
}
