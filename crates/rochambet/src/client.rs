//! The challenge client: registration hand-off, the round state machine,
//! and the connection-per-round lifecycle.
//!
//! The flow for one session is:
//!   1. `register()` — obtain the signed token over HTTP, dial the socket
//!   2. `submit_throw()` — validate the wager, send `{token, throw, gold}`
//!   3. `await_round()` — process exactly one inbound frame
//!   4. on a resolution: rotate the token, confirm the balance, retire the
//!      socket and dial a brand-new one; on a server error: stay on the
//!      same socket
//!
//! The live connection is owned state of this client (`Option<Connection>`),
//! created, replaced, and disposed only through the methods below — never
//! ambient, so its lifecycle stays auditable and testable in isolation.

use rochambet_protocol::{
    ChallengeReply, ChallengeRequest, Codec, JsonCodec, Outcome, ProtocolError,
    RoundReply, Throw,
};
use rochambet_session::{MessageLog, Registrar, Session, SessionManager};
use rochambet_transport::{Connection, Connector};

use crate::narrative::narrate;
use crate::RochambetError;

/// Appended when a throw is submitted with a wager below 1 gold.
/// No frame reaches the wire in that case.
pub const BET_TOO_SMALL: &str = "You can't bet less than 1 gold...";

/// Appended when the socket drops while a round is unresolved.
pub const CONNECTION_LOST: &str = "Lost connection to the game server.";

// ---------------------------------------------------------------------------
// RoundState
// ---------------------------------------------------------------------------

/// The round state machine.
///
/// ```text
///  Disconnected ──register/reconnect──→ Connecting ──→ Ready
///       ↑                                               │ submit_throw
///       │ socket lost / teardown                        ▼
///       └────────────────────────────────────── AwaitingOutcome
///                                                       │
///                   error frame: back to Ready (same socket)
///                   resolution:  Connecting → Ready (new socket)
/// ```
///
/// `AwaitingOutcome` carries the in-flight throw (needed for the rock
/// acknowledgment in the narrative) and the round nonce to verify against
/// the server's echo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundState {
    /// No live connection. The starting state, and where teardown or a
    /// lost socket lands.
    Disconnected,

    /// A dial is in flight.
    Connecting,

    /// Connected and idle; a throw may be submitted.
    Ready,

    /// A challenge is on the wire; exactly one frame resolves it.
    AwaitingOutcome { throw: Throw, nonce: u64 },
}

/// What one inbound frame amounted to. Connection loss is a modeled event,
/// not an error — the caller decides whether to `reconnect()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundEvent {
    /// The round settled: token rotated, balance confirmed, narrative
    /// appended, socket replaced.
    Resolved(Outcome),

    /// The server rejected the challenge; the message was appended verbatim
    /// and token, balance, and socket are all untouched.
    Rejected(String),

    /// The socket dropped without a frame. State is now `Disconnected` and
    /// a loss message was appended.
    ConnectionLost,
}

// ---------------------------------------------------------------------------
// ChallengeClient
// ---------------------------------------------------------------------------

/// The client core: session manager plus challenge protocol handler.
///
/// Generic over the registration seam (`R`) and the connection seam (`C`) so
/// the whole state machine runs against in-memory fakes in tests. Production
/// code uses `HttpRegistrar` and `WebSocketConnector`.
pub struct ChallengeClient<R: Registrar, C: Connector> {
    sessions: SessionManager<R>,
    connector: C,
    codec: JsonCodec,
    conn: Option<C::Connection>,
    state: RoundState,
    /// Rounds resolved this session. Monotonic, for log correlation.
    round: u64,
}

impl<R: Registrar, C: Connector> ChallengeClient<R, C> {
    /// Creates an unregistered, disconnected client.
    pub fn new(registrar: R, connector: C) -> Self {
        Self {
            sessions: SessionManager::new(registrar),
            connector,
            codec: JsonCodec,
            conn: None,
            state: RoundState::Disconnected,
            round: 0,
        }
    }

    // -- Session lifecycle --------------------------------------------------

    /// Registers `username`, then opens the challenge connection.
    ///
    /// On registration failure the failure line is already in the log, no
    /// dial is attempted, and the client stays `Disconnected`; retrying is
    /// always allowed.
    pub async fn register(&mut self, username: &str) -> Result<(), RochambetError> {
        self.sessions.register(username).await?;
        self.open_connection().await
    }

    /// Explicit recovery action after a lost connection.
    ///
    /// Only valid from `Disconnected` with an active session — there is no
    /// automatic retry anywhere in this client.
    pub async fn reconnect(&mut self) -> Result<(), RochambetError> {
        if self.state != RoundState::Disconnected {
            return Err(RochambetError::State(
                "reconnect is only valid while disconnected".into(),
            ));
        }
        if !self.sessions.is_active() {
            return Err(RochambetError::State(
                "cannot reconnect before registering".into(),
            ));
        }
        self.open_connection().await
    }

    /// Closes the live connection, if any. Idempotent, safe to call before
    /// any connect, and guaranteed not to fail; always lands in
    /// `Disconnected`. No frame is ever processed after this returns.
    pub async fn teardown(&mut self) {
        self.dispose_connection().await;
        self.state = RoundState::Disconnected;
    }

    // -- Round operations ---------------------------------------------------

    /// Submits one throw with the session's pending wager.
    ///
    /// Returns `Ok(false)` when the wager is below 1 gold: exactly one
    /// message is appended, nothing touches the wire, and the state stays
    /// `Ready`. Returns `Ok(true)` when the challenge was sent and the
    /// client is now `AwaitingOutcome`.
    ///
    /// # Errors
    /// [`RochambetError::State`] outside `Ready`; a transport error if the
    /// send fails (the connection is then treated as lost).
    pub async fn submit_throw(&mut self, throw: Throw) -> Result<bool, RochambetError> {
        if self.state != RoundState::Ready {
            return Err(RochambetError::State(format!(
                "cannot submit a throw while {:?}",
                self.state
            )));
        }
        let session = self.active_session()?;
        let bet = session.pending_bet;
        if bet < 1 {
            self.sessions.log_mut().push(BET_TOO_SMALL);
            return Ok(false);
        }

        let nonce: u64 = rand::random();
        let request = ChallengeRequest {
            token: session.token.clone(),
            throw,
            gold: bet as u64,
            nonce: Some(nonce),
        };
        let bytes = self.codec.encode(&request)?;

        let Some(conn) = self.conn.as_mut() else {
            return Err(RochambetError::State(
                "ready without a live connection".into(),
            ));
        };
        if let Err(e) = conn.send(&bytes).await {
            self.lose_connection();
            return Err(e.into());
        }

        tracing::info!(%throw, gold = bet, round = self.round, "challenge submitted");
        self.state = RoundState::AwaitingOutcome { throw, nonce };
        Ok(true)
    }

    /// Waits for and processes exactly one inbound frame.
    ///
    /// - Server error frame → appended verbatim, back to `Ready` on the
    ///   same socket, token and balance untouched.
    /// - Resolution frame → nonce verified, token rotated, balance set to
    ///   the frame's confirmed value, narrative appended, and the socket
    ///   replaced with a freshly dialed one (the server closes its side
    ///   after settling, so reuse would stall).
    /// - Closed/failing socket → `Disconnected` with a loss message.
    ///
    /// # Errors
    /// [`RochambetError::State`] outside `AwaitingOutcome`. A frame that
    /// doesn't decode, or a resolution with a wrong nonce echo, is a
    /// protocol error; the state is left in `AwaitingOutcome` and the
    /// balance is never touched by such a frame.
    pub async fn await_round(&mut self) -> Result<RoundEvent, RochambetError> {
        let RoundState::AwaitingOutcome { throw, nonce } = self.state else {
            return Err(RochambetError::State(
                "no challenge is awaiting an outcome".into(),
            ));
        };
        let Some(conn) = self.conn.as_mut() else {
            return Err(RochambetError::State(
                "awaiting an outcome without a live connection".into(),
            ));
        };

        let frame = match conn.recv().await {
            Ok(Some(frame)) => frame,
            Ok(None) => {
                self.lose_connection();
                return Ok(RoundEvent::ConnectionLost);
            }
            Err(e) => {
                tracing::warn!(error = %e, "receive failed mid-round");
                self.lose_connection();
                return Ok(RoundEvent::ConnectionLost);
            }
        };

        let reply: ChallengeReply = self.codec.decode(&frame)?;
        match reply.classify()? {
            RoundReply::Error(message) => {
                tracing::debug!(%message, "server rejected the challenge");
                self.sessions.log_mut().push(message.clone());
                self.state = RoundState::Ready;
                Ok(RoundEvent::Rejected(message))
            }
            RoundReply::Resolved(resolution) => {
                // Replay hardening: a frame that doesn't echo our nonce may
                // be a replayed earlier resolution. Servers that don't echo
                // at all are still accepted (baseline contract).
                if let Some(echo) = resolution.nonce {
                    if echo != nonce {
                        return Err(ProtocolError::InvalidMessage(format!(
                            "round nonce mismatch: sent {nonce}, got {echo}"
                        ))
                        .into());
                    }
                }

                let previous_gold = self.active_session()?.gold;
                let line = narrate(previous_gold, &resolution, throw);
                let outcome = resolution.outcome.clone();

                let session = self.active_session_mut()?;
                session.token = resolution.token;
                session.gold = resolution.gold;
                self.sessions.log_mut().push(line);

                self.round += 1;
                tracing::info!(
                    %outcome,
                    gold = resolution.gold,
                    opposer = %resolution.opposer,
                    round = self.round,
                    "round resolved"
                );

                // Connection-per-round: retire this socket and dial anew.
                self.open_connection().await?;
                Ok(RoundEvent::Resolved(outcome))
            }
        }
    }

    /// Convenience: submit and, if a frame went out, await its resolution.
    ///
    /// Returns `Ok(None)` when validation stopped the submit locally.
    pub async fn play_round(
        &mut self,
        throw: Throw,
    ) -> Result<Option<RoundEvent>, RochambetError> {
        if self.submit_throw(throw).await? {
            Ok(Some(self.await_round().await?))
        } else {
            Ok(None)
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// Current round state.
    pub fn state(&self) -> RoundState {
        self.state
    }

    /// Last server-confirmed balance, once registered.
    pub fn gold(&self) -> Option<u64> {
        self.sessions.session().map(|s| s.gold)
    }

    /// The current session, once registered.
    pub fn session(&self) -> Option<&Session> {
        self.sessions.session()
    }

    /// The user-facing message log.
    pub fn log(&self) -> &MessageLog {
        self.sessions.log()
    }

    /// Sets the pending wager directly.
    pub fn set_bet(&mut self, bet: i64) {
        if let Some(session) = self.sessions.session_mut() {
            session.pending_bet = bet;
        }
    }

    /// Sets the pending wager from raw user input; unparseable input
    /// appends a message and keeps the previous bet.
    pub fn set_bet_input(&mut self, raw: &str) {
        self.sessions.set_bet_input(raw);
    }

    // -- Connection lifecycle (the only paths that touch `self.conn`) -------

    async fn open_connection(&mut self) -> Result<(), RochambetError> {
        // Any held socket is retired with a proper close handshake before a
        // new one is dialed; a connection is never silently dropped.
        self.dispose_connection().await;
        self.state = RoundState::Connecting;
        match self.connector.connect().await {
            Ok(conn) => {
                tracing::debug!(id = %conn.id(), "challenge connection ready");
                self.conn = Some(conn);
                self.state = RoundState::Ready;
                Ok(())
            }
            Err(e) => {
                self.state = RoundState::Disconnected;
                Err(e.into())
            }
        }
    }

    async fn dispose_connection(&mut self) {
        if let Some(mut conn) = self.conn.take() {
            if let Err(e) = conn.close().await {
                tracing::debug!(error = %e, "close failed while retiring connection");
            }
        }
    }

    /// A dead socket: drop the handle, surface the loss, require an
    /// explicit `reconnect()`.
    fn lose_connection(&mut self) {
        tracing::warn!("connection lost");
        self.conn = None;
        self.state = RoundState::Disconnected;
        self.sessions.log_mut().push(CONNECTION_LOST);
    }

    fn active_session(&self) -> Result<&Session, RochambetError> {
        self.sessions
            .session()
            .ok_or_else(|| RochambetError::State("no active session".into()))
    }

    fn active_session_mut(&mut self) -> Result<&mut Session, RochambetError> {
        self.sessions
            .session_mut()
            .ok_or_else(|| RochambetError::State("no active session".into()))
    }
}

// =========================================================================
// Tests
// =========================================================================
