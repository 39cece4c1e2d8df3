//! Wire protocol for the Rochambet challenge client.
//!
//! This crate defines the language spoken with the game server:
//!
//! - **Types** ([`ChallengeRequest`], [`ChallengeReply`], [`Throw`],
//!   [`Outcome`], …) — the frames and tags that travel on the wire.
//! - **Codec** ([`Codec`] trait, [`JsonCodec`]) — how frames become bytes.
//! - **Errors** ([`ProtocolError`]) — what can go wrong in between.
//!
//! The protocol layer sits between transport (raw frames) and session
//! (identity and balance). It knows nothing about connections or gold
//! accounting — only shapes.

mod codec;
mod error;
mod types;

pub use codec::Codec;
#[cfg(feature = "json")]
pub use codec::JsonCodec;
pub use error::ProtocolError;
pub use types::{
    ChallengeReply, ChallengeRequest, Outcome, RegisterRequest, RoundReply,
    RoundResolution, Throw, STARTING_GOLD,
};
