//! Error types for the session layer.

/// Errors that can occur during registration and session management.
///
/// All of these recover locally: a user-visible line is appended and the
/// player may simply retry. Nothing here is fatal to the process.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The username was empty. The only validation the client performs —
    /// anything stricter is the server's call.
    #[error("username must not be empty")]
    EmptyUsername,

    /// The registration service answered with a non-2xx status.
    #[error("registration rejected with status {status}")]
    Rejected { status: u16 },

    /// The registration request never completed (DNS, refused, timeout).
    #[error("registration request failed: {0}")]
    Network(#[from] reqwest::Error),
}
