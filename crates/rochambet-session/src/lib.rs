//! Session layer for the Rochambet client.
//!
//! This crate owns everything about *who* is playing:
//!
//! 1. **Registration** — exchanging a username for a signed token
//!    ([`Registrar`] trait, [`HttpRegistrar`])
//! 2. **Session state** — the token, confirmed balance, and pending wager
//!    ([`Session`], owned through [`SessionManager`])
//! 3. **The message log** — every user-facing line, oldest first
//!    ([`MessageLog`])
//!
//! # How it fits in the stack
//!
//! ```text
//! Challenge client (above)  ← rotates the token, confirms balances
//!     ↕
//! Session layer (this crate)  ← identity, credential, log
//!     ↕
//! Protocol layer (below)  ← RegisterRequest, STARTING_GOLD
//! ```

#![allow(async_fn_in_trait)]

mod error;
mod manager;
mod registrar;
mod session;

pub use error::SessionError;
pub use manager::{SessionManager, REGISTRATION_FAILED};
pub use registrar::{HttpRegistrar, Registrar};
pub use session::{MessageLog, Session};
