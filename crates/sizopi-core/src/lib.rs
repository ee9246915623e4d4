#![forbid(unsafe_code)]
//! Pure helpers shared by every Sizopi crate.
//!
//! Nothing in here touches the database or the network. The canonicalizers
//! in [`stamp`] are the single source of truth for the textual form of
//! composite record keys; every create/update/delete/lookup path goes
//! through them.

mod secret;
mod stamp;

pub use secret::{hash_password, mint_session_token, random_token, verify_password, SecretError};
pub use stamp::{canonical_date, canonical_datetime, TimestampError};

pub const CRATE_NAME: &str = "sizopi-core";
