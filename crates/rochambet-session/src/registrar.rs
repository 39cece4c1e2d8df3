//! Registration hook for obtaining a signed session token.
//!
//! The registration service is an external collaborator: it takes a username
//! and answers with an opaque signed token that every subsequent challenge
//! must echo. The [`Registrar`] trait is the seam — the live implementation
//! is [`HttpRegistrar`]; tests substitute a canned one so the session layer
//! can be exercised without a server.

use rochambet_protocol::RegisterRequest;

use crate::SessionError;

/// Exchanges a username for an opaque signed session token.
pub trait Registrar: Send + Sync + 'static {
    /// Registers `username` and returns the token on success.
    ///
    /// # Errors
    /// - [`SessionError::Rejected`] — the service refused the username
    /// - [`SessionError::Network`] — the request never completed
    fn register(
        &self,
        username: &str,
    ) -> impl std::future::Future<Output = Result<String, SessionError>> + Send;
}

/// The live [`Registrar`]: `POST {base}/register` with a JSON body.
///
/// The 2xx response body is the token, returned as plain text. Anything
/// non-2xx is a rejection; the client never inspects the body of a failure.
#[derive(Debug, Clone)]
pub struct HttpRegistrar {
    base_url: String,
    http: reqwest::Client,
}

impl HttpRegistrar {
    /// Creates a registrar for the given base URL, e.g.
    /// `http://localhost:8000`.
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self {
            base_url,
            http: reqwest::Client::new(),
        }
    }
}

impl Registrar for HttpRegistrar {
    async fn register(&self, username: &str) -> Result<String, SessionError> {
        let url = format!("{}/register", self.base_url);
        let response = self
            .http
            .post(&url)
            .json(&RegisterRequest {
                username: username.to_string(),
            })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(username, %status, "registration rejected");
            return Err(SessionError::Rejected {
                status: status.as_u16(),
            });
        }

        let token = response.text().await?;
        tracing::info!(username, "registration succeeded");
        Ok(token)
    }
}
