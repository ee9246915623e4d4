// SPDX-License-Identifier: Apache-2.0

//! Password hashing and opaque token minting.
//!
//! Credentials are stored as argon2id PHC strings and verified with the
//! library's constant-time check. Session tokens and staff ids are random
//! bytes from the OS, base64url-encoded without padding.

use argon2::password_hash::rand_core::{OsRng, RngCore};
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SecretError(pub String);

impl Display for SecretError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for SecretError {}

/// Hash a raw password into an argon2id PHC string with a fresh salt.
pub fn hash_password(raw: &str) -> Result<String, SecretError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(raw.as_bytes(), &salt)
        .map_err(|e| SecretError(format!("password hashing failed: {e}")))?;
    Ok(hash.to_string())
}

/// Verify a raw password against a stored PHC string.
///
/// Returns `Ok(false)` on mismatch; `Err` only for malformed stored
/// material.
pub fn verify_password(raw: &str, stored: &str) -> Result<bool, SecretError> {
    let parsed = PasswordHash::new(stored)
        .map_err(|e| SecretError(format!("stored credential is malformed: {e}")))?;
    match Argon2::default().verify_password(raw.as_bytes(), &parsed) {
        Ok(()) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(SecretError(format!("password verification failed: {e}"))),
    }
}

/// Random base64url token of `bytes` bytes of OS entropy.
#[must_use]
pub fn random_token(bytes: usize) -> String {
    let mut buf = vec![0u8; bytes];
    OsRng.fill_bytes(&mut buf);
    URL_SAFE_NO_PAD.encode(buf)
}

/// Opaque bearer token for a logged-in session.
#[must_use]
pub fn mint_session_token() -> String {
    random_token(32)
}
