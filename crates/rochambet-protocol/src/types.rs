//! Wire types for the Rochambet challenge protocol.
//!
//! This module defines every structure that travels on the wire between the
//! client and the game server: the challenge request the client sends, and
//! the reply frame the server answers with. The shapes here are a contract —
//! the server is an external collaborator, so field names and tags must match
//! it exactly, down to single-letter throw tags.

use serde::{Deserialize, Serialize};

use std::fmt;

use crate::ProtocolError;

/// Gold balance the server grants a freshly registered player.
///
/// The registration token encodes this amount; the client mirrors it as the
/// initial displayed balance until the first round is confirmed.
pub const STARTING_GOLD: u64 = 100;

// ---------------------------------------------------------------------------
// Throw
// ---------------------------------------------------------------------------

/// The player's committed move for one round.
///
/// On the wire these are single-letter tags (`"r"`, `"p"`, `"s"`) — the
/// `#[serde(rename)]` attributes pin the JSON representation to the server
/// contract, independent of the Rust variant names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Throw {
    #[serde(rename = "r")]
    Rock,
    #[serde(rename = "p")]
    Paper,
    #[serde(rename = "s")]
    Scissors,
}

impl Throw {
    /// Returns the single-letter wire tag for this throw.
    pub fn wire_tag(self) -> &'static str {
        match self {
            Throw::Rock => "r",
            Throw::Paper => "p",
            Throw::Scissors => "s",
        }
    }
}

/// Human-readable form, used in logs — the wire always uses [`wire_tag`].
///
/// [`wire_tag`]: Throw::wire_tag
impl fmt::Display for Throw {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Throw::Rock => "rock",
            Throw::Paper => "paper",
            Throw::Scissors => "scissors",
        };
        write!(f, "{name}")
    }
}

// ---------------------------------------------------------------------------
// Outcome
// ---------------------------------------------------------------------------

/// The server's verdict for a resolved round.
///
/// The server sends uppercase tags (`"WIN"`, `"LOSS"`, `"TIE"`). Anything
/// else lands in [`Outcome::Unrecognized`], preserving the original tag so
/// the caller can surface it instead of failing the whole frame. That is why
/// this converts through `String` (`#[serde(from, into)]`) rather than
/// deriving a closed enum that would reject unknown tags at decode time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Outcome {
    Win,
    Loss,
    Tie,
    /// A tag this client doesn't know. Never expected from a well-behaved
    /// server; kept verbatim for the defensive fallback message.
    Unrecognized(String),
}

impl From<String> for Outcome {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "WIN" => Outcome::Win,
            "LOSS" => Outcome::Loss,
            "TIE" => Outcome::Tie,
            _ => Outcome::Unrecognized(tag),
        }
    }
}

impl From<Outcome> for String {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Win => "WIN".to_string(),
            Outcome::Loss => "LOSS".to_string(),
            Outcome::Tie => "TIE".to_string(),
            Outcome::Unrecognized(tag) => tag,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Win => write!(f, "WIN"),
            Outcome::Loss => write!(f, "LOSS"),
            Outcome::Tie => write!(f, "TIE"),
            Outcome::Unrecognized(tag) => write!(f, "{tag}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Registration
// ---------------------------------------------------------------------------

/// Body of the one-shot `POST /register` call.
///
/// The response body is the opaque signed token, returned as plain text —
/// there is no response type to model here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

// ---------------------------------------------------------------------------
// ChallengeRequest — client → server
// ---------------------------------------------------------------------------

/// One throw-plus-wager submission. Constructed fresh per round, never
/// persisted.
///
/// The `token` is echoed verbatim from the most recent server issue; the
/// client never parses or modifies it. `nonce` is a client-side replay
/// hardening: a fresh random value per round that the server may echo back
/// in the resolution. It is skipped entirely when unset so the baseline
/// frame shape stays byte-compatible with servers that predate it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeRequest {
    pub token: String,
    pub throw: Throw,
    pub gold: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
}

// ---------------------------------------------------------------------------
// ChallengeReply — server → client
// ---------------------------------------------------------------------------

/// Raw inbound frame from the challenge endpoint.
///
/// The server marshals every field on every reply — an error frame arrives
/// with empty `token`/`opposer` and a zero `gold`, and a resolution frame
/// arrives with an empty `error`. Discrimination is therefore by a
/// *non-empty* `error`, not by field presence, which is why this is a single
/// struct with defaults instead of an untagged enum. [`classify`] turns it
/// into the two cases the client actually handles.
///
/// [`classify`]: ChallengeReply::classify
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ChallengeReply {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub error: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub token: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outcome: Option<Outcome>,
    #[serde(default)]
    pub gold: u64,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub opposer: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<u64>,
}

impl ChallengeReply {
    /// Builds an error frame. Mostly useful in tests and mock servers.
    pub fn from_error(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
            ..Self::default()
        }
    }

    /// Splits the raw frame into the error or resolution case.
    ///
    /// # Errors
    /// Returns [`ProtocolError::InvalidMessage`] when the frame carries
    /// neither an error string nor an outcome — a shape no version of the
    /// server produces.
    pub fn classify(self) -> Result<RoundReply, ProtocolError> {
        if !self.error.is_empty() {
            return Ok(RoundReply::Error(self.error));
        }
        match self.outcome {
            Some(outcome) => Ok(RoundReply::Resolved(RoundResolution {
                token: self.token,
                outcome,
                gold: self.gold,
                opposer: self.opposer,
                nonce: self.nonce,
            })),
            None => Err(ProtocolError::InvalidMessage(
                "reply carries neither an error nor an outcome".into(),
            )),
        }
    }
}

/// A classified server reply: exactly one of the two frame kinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoundReply {
    /// The server rejected the challenge. Token and balance are untouched.
    Error(String),

    /// The round settled. The embedded token *replaces* the session's token.
    Resolved(RoundResolution),
}

/// A settled round: the rotated token, the verdict, and the new balance.
///
/// `gold` is the authoritative post-round balance, not a delta — the client
/// must display exactly this value, never a locally-predicted one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResolution {
    pub token: String,
    pub outcome: Outcome,
    pub gold: u64,
    pub opposer: String,
    pub nonce: Option<u64>,
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    //! The wire shapes here are an external contract — the server is not in
    //! this repository. These tests pin the exact JSON the serde attributes
    //! produce and accept, because a drift means rounds silently stop
    //! settling.

    use super::*;

    // =====================================================================
    // Throw
    // =====================================================================

    #[test]
    fn test_throw_serializes_as_single_letter_tag() {
        assert_eq!(serde_json::to_string(&Throw::Rock).unwrap(), "\"r\"");
        assert_eq!(serde_json::to_string(&Throw::Paper).unwrap(), "\"p\"");
        assert_eq!(serde_json::to_string(&Throw::Scissors).unwrap(), "\"s\"");
    }

    #[test]
    fn test_throw_deserializes_from_single_letter_tag() {
        let t: Throw = serde_json::from_str("\"p\"").unwrap();
        assert_eq!(t, Throw::Paper);
    }

    #[test]
    fn test_throw_rejects_full_word() {
        // The server speaks single letters only.
        let result: Result<Throw, _> = serde_json::from_str("\"rock\"");
        assert!(result.is_err());
    }

    #[test]
    fn test_throw_display_is_full_word() {
        assert_eq!(Throw::Rock.to_string(), "rock");
        assert_eq!(Throw::Scissors.wire_tag(), "s");
    }

    // =====================================================================
    // Outcome
    // =====================================================================

    #[test]
    fn test_outcome_parses_known_tags() {
        assert_eq!(Outcome::from("WIN".to_string()), Outcome::Win);
        assert_eq!(Outcome::from("LOSS".to_string()), Outcome::Loss);
        assert_eq!(Outcome::from("TIE".to_string()), Outcome::Tie);
    }

    #[test]
    fn test_outcome_preserves_unknown_tag() {
        let o = Outcome::from("DRAWISH".to_string());
        assert_eq!(o, Outcome::Unrecognized("DRAWISH".into()));
        assert_eq!(o.to_string(), "DRAWISH");
    }

    #[test]
    fn test_outcome_deserializes_from_json_string() {
        let o: Outcome = serde_json::from_str("\"WIN\"").unwrap();
        assert_eq!(o, Outcome::Win);
    }

    #[test]
    fn test_outcome_serializes_back_to_uppercase_tag() {
        assert_eq!(serde_json::to_string(&Outcome::Loss).unwrap(), "\"LOSS\"");
    }

    // =====================================================================
    // ChallengeRequest
    // =====================================================================

    #[test]
    fn test_request_json_field_names_match_contract() {
        let req = ChallengeRequest {
            token: "tok-1".into(),
            throw: Throw::Rock,
            gold: 10,
            nonce: None,
        };
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();

        assert_eq!(json["token"], "tok-1");
        assert_eq!(json["throw"], "r");
        assert_eq!(json["gold"], 10);
    }

    #[test]
    fn test_request_without_nonce_omits_the_field() {
        // Baseline servers decode the bare triple; an absent nonce must be
        // absent, not null.
        let req = ChallengeRequest {
            token: "t".into(),
            throw: Throw::Paper,
            gold: 1,
            nonce: None,
        };
        let json: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert!(json.get("nonce").is_none());
    }

    #[test]
    fn test_request_with_nonce_round_trips() {
        let req = ChallengeRequest {
            token: "t".into(),
            throw: Throw::Scissors,
            gold: 7,
            nonce: Some(991),
        };
        let bytes = serde_json::to_vec(&req).unwrap();
        let decoded: ChallengeRequest = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(req, decoded);
    }

    // =====================================================================
    // ChallengeReply classification
    // =====================================================================

    #[test]
    fn test_reply_with_error_classifies_as_error() {
        // The real server marshals *every* field on an error reply — the
        // resolution fields arrive empty/zero alongside the error string.
        let json = r#"{
            "outcome": "",
            "gold": 0,
            "token": "",
            "error": "Trying to bet more than you can!",
            "opposer": ""
        }"#;
        let reply: ChallengeReply = serde_json::from_str(json).unwrap();

        match reply.classify().unwrap() {
            RoundReply::Error(msg) => {
                assert_eq!(msg, "Trying to bet more than you can!");
            }
            other => panic!("expected error reply, got {other:?}"),
        }
    }

    #[test]
    fn test_reply_with_empty_error_classifies_as_resolution() {
        // Conversely, a settled round still carries `"error": ""`.
        let json = r#"{
            "outcome": "WIN",
            "gold": 115,
            "token": "tok-2",
            "error": "",
            "opposer": "bob"
        }"#;
        let reply: ChallengeReply = serde_json::from_str(json).unwrap();

        match reply.classify().unwrap() {
            RoundReply::Resolved(res) => {
                assert_eq!(res.token, "tok-2");
                assert_eq!(res.outcome, Outcome::Win);
                assert_eq!(res.gold, 115);
                assert_eq!(res.opposer, "bob");
                assert_eq!(res.nonce, None);
            }
            other => panic!("expected resolution, got {other:?}"),
        }
    }

    #[test]
    fn test_reply_minimal_error_frame() {
        // A minimal `{"error": ...}` frame (no other fields) must also work.
        let reply: ChallengeReply =
            serde_json::from_str(r#"{"error": "invalid token"}"#).unwrap();
        assert_eq!(
            reply.classify().unwrap(),
            RoundReply::Error("invalid token".into())
        );
    }

    #[test]
    fn test_reply_unrecognized_outcome_is_preserved() {
        let json = r#"{"outcome": "FORFEIT", "gold": 90, "token": "t3", "opposer": "eve"}"#;
        let reply: ChallengeReply = serde_json::from_str(json).unwrap();

        match reply.classify().unwrap() {
            RoundReply::Resolved(res) => {
                assert_eq!(res.outcome, Outcome::Unrecognized("FORFEIT".into()));
            }
            other => panic!("expected resolution, got {other:?}"),
        }
    }

    #[test]
    fn test_reply_with_nonce_echo() {
        let json = r#"{"outcome": "TIE", "gold": 100, "token": "t2", "opposer": "bob", "nonce": 42}"#;
        let reply: ChallengeReply = serde_json::from_str(json).unwrap();

        match reply.classify().unwrap() {
            RoundReply::Resolved(res) => assert_eq!(res.nonce, Some(42)),
            other => panic!("expected resolution, got {other:?}"),
        }
    }

    #[test]
    fn test_reply_shapeless_frame_is_invalid() {
        // Neither an error nor an outcome: no server version sends this.
        let reply: ChallengeReply = serde_json::from_str(r#"{"gold": 5}"#).unwrap();
        assert!(matches!(
            reply.classify(),
            Err(ProtocolError::InvalidMessage(_))
        ));
    }

    #[test]
    fn test_error_frame_serializes_minimal() {
        // Mock servers built from `from_error` should emit the lean shape.
        let json: serde_json::Value =
            serde_json::to_value(ChallengeReply::from_error("nope")).unwrap();
        assert_eq!(json, serde_json::json!({"error": "nope", "gold": 0}));
    }

    // =====================================================================
    // RegisterRequest
    // =====================================================================

    #[test]
    fn test_register_request_json_shape() {
        let json: serde_json::Value = serde_json::to_value(RegisterRequest {
            username: "alice".into(),
        })
        .unwrap();
        assert_eq!(json, serde_json::json!({"username": "alice"}));
    }

    #[test]
    fn test_decode_garbage_returns_error() {
        let garbage = b"not json at all";
        let result: Result<ChallengeReply, _> = serde_json::from_slice(garbage);
        assert!(result.is_err());
    }
}
