//! The session manager: owns registration, the credential, and the log.
//!
//! One manager exists per UI component instance. It starts unregistered,
//! becomes active on a successful registration, and hands its session state
//! to the challenge handler for the round traffic. Registration failures
//! never destroy anything — the manager stays (or returns to) unregistered
//! and the player can retry.

use crate::{MessageLog, Registrar, Session, SessionError};

/// The one user-visible registration-failure line. Appended on every failed
/// path (empty name, network error, server rejection); the server stays
/// authoritative on the actual reason.
pub const REGISTRATION_FAILED: &str =
    "Error in registering user (May need to provide valid username?).";

/// Appended when a bet input can't be parsed; `{raw}` is the offending text.
fn bet_parse_failed(raw: &str) -> String {
    format!("Failed to parse int from {raw}")
}

/// Owns the session lifecycle on the client side.
///
/// ```text
///  [Unregistered] ──register() ok──→ [Active]
///        ↑  └──register() err──┐        │
///        └─────────────────────┘   (handed to the challenge handler)
/// ```
pub struct SessionManager<R: Registrar> {
    registrar: R,
    session: Option<Session>,
    log: MessageLog,
}

impl<R: Registrar> SessionManager<R> {
    /// Creates an unregistered manager with an empty log.
    pub fn new(registrar: R) -> Self {
        Self {
            registrar,
            session: None,
            log: MessageLog::new(),
        }
    }

    /// Registers `username` and, on success, starts a fresh session.
    ///
    /// Success clears the message log (a new session starts with a clean
    /// slate) and stores the returned token. Every failure appends
    /// [`REGISTRATION_FAILED`] and leaves the manager unregistered; an empty
    /// username fails locally without touching the network.
    pub async fn register(&mut self, username: &str) -> Result<(), SessionError> {
        if username.is_empty() {
            self.log.push(REGISTRATION_FAILED);
            return Err(SessionError::EmptyUsername);
        }

        match self.registrar.register(username).await {
            Ok(token) => {
                self.log.clear();
                self.session = Some(Session::new(username, token));
                tracing::info!(username, "session active");
                Ok(())
            }
            Err(e) => {
                tracing::warn!(username, error = %e, "registration failed");
                self.log.push(REGISTRATION_FAILED);
                Err(e)
            }
        }
    }

    /// Returns `true` once a registration has succeeded.
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The current session, if registered.
    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    /// Mutable access for the challenge handler (token rotation, balance).
    pub fn session_mut(&mut self) -> Option<&mut Session> {
        self.session.as_mut()
    }

    /// The user-facing message log.
    pub fn log(&self) -> &MessageLog {
        &self.log
    }

    /// Mutable access to the log for the challenge handler.
    pub fn log_mut(&mut self) -> &mut MessageLog {
        &mut self.log
    }

    /// Updates the pending wager from raw user input.
    ///
    /// Unparseable input appends a message and leaves the previous bet in
    /// place — bad input must never reach the wire, and submit-time
    /// validation separately rejects non-positive amounts.
    pub fn set_bet_input(&mut self, raw: &str) {
        match raw.trim().parse::<i64>() {
            Ok(bet) => {
                if let Some(session) = self.session.as_mut() {
                    session.pending_bet = bet;
                }
            }
            Err(_) => self.log.push(bet_parse_failed(raw)),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
