//! Unified error type for the Rochambet client.

use rochambet_protocol::ProtocolError;
use rochambet_session::SessionError;
use rochambet_transport::TransportError;

/// Top-level error that wraps all crate-specific errors.
///
/// When using the `rochambet` meta-crate, you deal with this single error
/// type instead of importing errors from each sub-crate. The `#[from]`
/// attribute on each variant auto-generates `From` impls, so the `?`
/// operator converts sub-crate errors automatically.
#[derive(Debug, thiserror::Error)]
pub enum RochambetError {
    /// A connection-level error (dial, send, recv).
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A protocol-level error (encode, decode, invalid frame, nonce
    /// mismatch).
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// A session-level error (registration).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// An operation was called in a state that forbids it — e.g. submitting
    /// a throw while a round is still unresolved.
    #[error("invalid client state: {0}")]
    State(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_transport_error() {
        let err = TransportError::ConnectionClosed("gone".into());
        let client_err: RochambetError = err.into();
        assert!(matches!(client_err, RochambetError::Transport(_)));
        assert!(client_err.to_string().contains("gone"));
    }

    #[test]
    fn test_from_protocol_error() {
        let err = ProtocolError::InvalidMessage("bad".into());
        let client_err: RochambetError = err.into();
        assert!(matches!(client_err, RochambetError::Protocol(_)));
    }

    #[test]
    fn test_from_session_error() {
        let err = SessionError::EmptyUsername;
        let client_err: RochambetError = err.into();
        assert!(matches!(client_err, RochambetError::Session(_)));
    }
}
