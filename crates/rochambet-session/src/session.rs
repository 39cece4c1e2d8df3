//! Session types: the client's record of one registered player.
//!
//! A session exists from successful registration until the owning component
//! is torn down. It holds the three things every round needs: the opaque
//! signed token, the last server-confirmed gold balance, and the pending
//! wager. It also owns the [`MessageLog`] of user-facing lines.

use rochambet_protocol::STARTING_GOLD;

// ---------------------------------------------------------------------------
// Session
// ---------------------------------------------------------------------------

/// One registered player's client-side state.
///
/// Invariants the protocol handler maintains:
/// - `token` is opaque — echoed verbatim on every request, replaced wholesale
///   when a round resolves, never parsed or edited.
/// - `gold` is always the most recently *server-confirmed* balance. The
///   client never predicts a balance locally.
#[derive(Debug, Clone)]
pub struct Session {
    /// The name registered with the server.
    pub username: String,

    /// The opaque signed credential proving identity and balance.
    pub token: String,

    /// Last server-confirmed gold balance.
    pub gold: u64,

    /// The wager staked on the next round. User input, so it can be
    /// non-positive; validation happens at submit time, before the wire.
    pub pending_bet: i64,
}

impl Session {
    /// Creates a fresh session from a registration result.
    ///
    /// Registration grants [`STARTING_GOLD`]; the token the server returned
    /// encodes the same amount, so mirroring it here keeps the displayed
    /// balance server-confirmed from the first frame.
    pub fn new(username: impl Into<String>, token: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            token: token.into(),
            gold: STARTING_GOLD,
            pending_bet: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// MessageLog
// ---------------------------------------------------------------------------

/// Append-only log of user-facing lines, oldest first.
///
/// Everything the player sees — outcome narratives, server errors, local
/// validation complaints — lands here. It is unbounded within a session and
/// cleared only on fresh registration.
#[derive(Debug, Clone, Default)]
pub struct MessageLog {
    entries: Vec<String>,
}

impl MessageLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one line.
    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    /// All lines, oldest first.
    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    /// The most recently appended line.
    pub fn last(&self) -> Option<&str> {
        self.entries.last().map(String::as_str)
    }

    /// Number of lines in the log.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Empties the log. Called on fresh registration, nowhere else.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_session_starts_with_registration_grant() {
        let session = Session::new("alice", "tok-1");
        assert_eq!(session.username, "alice");
        assert_eq!(session.token, "tok-1");
        assert_eq!(session.gold, STARTING_GOLD);
        assert_eq!(session.pending_bet, 1);
    }

    #[test]
    fn test_message_log_preserves_order() {
        let mut log = MessageLog::new();
        log.push("first");
        log.push("second");
        log.push("third");

        assert_eq!(log.entries(), ["first", "second", "third"]);
        assert_eq!(log.last(), Some("third"));
        assert_eq!(log.len(), 3);
    }

    #[test]
    fn test_message_log_clear() {
        let mut log = MessageLog::new();
        log.push("stale");
        log.clear();
        assert!(log.is_empty());
        assert_eq!(log.last(), None);
    }
}
