//! Error types for the protocol layer.

/// Errors that can occur while encoding, decoding, or interpreting frames.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust type into bytes).
    #[cfg(feature = "json")]
    #[error("encode failed: {0}")]
    Encode(serde_json::Error),

    /// Deserialization failed (turning bytes into a Rust type).
    #[cfg(feature = "json")]
    #[error("decode failed: {0}")]
    Decode(serde_json::Error),

    /// The frame decoded fine but violates protocol rules — e.g. a reply
    /// carrying neither an error nor an outcome, or a round nonce that
    /// doesn't match the one the client sent.
    #[error("invalid message: {0}")]
    InvalidMessage(String),
}
