//! # Rochambet
//!
//! Client for a real-time rock/paper/scissors wagering game.
//!
//! The server matches two connected players, settles the round, and answers
//! each with a signed token for the next round plus their new gold balance.
//! This crate owns the client side of that contract:
//!
//! - [`ChallengeClient`] — registration, the round state machine, and the
//!   connection-per-round lifecycle
//! - [`LobbyClient`] — the free-text lobby side channel
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use rochambet::prelude::*;
//!
//! # async fn run() -> Result<(), RochambetError> {
//! let mut client = ChallengeClient::new(
//!     HttpRegistrar::new("http://localhost:8000"),
//!     WebSocketConnector::new("ws://localhost:8000/challenge"),
//! );
//! client.register("alice").await?;
//! client.set_bet(10);
//! if let Some(event) = client.play_round(Throw::Rock).await? {
//!     println!("{event:?}");
//! }
//! for line in client.log().entries() {
//!     println!("{line}");
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod lobby;
mod narrative;

pub use client::{ChallengeClient, RoundEvent, RoundState, BET_TOO_SMALL, CONNECTION_LOST};
pub use error::RochambetError;
pub use lobby::LobbyClient;

pub use rochambet_protocol::{Outcome, Throw, STARTING_GOLD};
pub use rochambet_session::{HttpRegistrar, MessageLog, Session, REGISTRATION_FAILED};
pub use rochambet_transport::WebSocketConnector;

/// The common imports, in one place.
pub mod prelude {
    pub use crate::{
        ChallengeClient, HttpRegistrar, LobbyClient, Outcome, RochambetError, RoundEvent,
        RoundState, Throw, WebSocketConnector,
    };
}
