// SPDX-License-Identifier: Apache-2.0

//! In-memory bearer sessions.
//!
//! Tokens are minted server side and never derived from anything the
//! client sends. Expired entries are pruned lazily on insert.

use sizopi_model::Username;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::{Duration, Instant};

struct Session {
    username: Username,
    expires: Instant,
}

pub struct SessionStore {
    ttl: Duration,
    inner: Mutex<HashMap<String, Session>>,
}

impl SessionStore {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Mint a fresh token bound to `username` and return it.
    pub fn issue(&self, username: Username) -> String {
        let token = sizopi_core::mint_session_token();
        let now = Instant::now();
        if let Ok(mut map) = self.inner.lock() {
            map.retain(|_, s| s.expires > now);
            map.insert(
                token.clone(),
                Session {
                    username,
                    expires: now + self.ttl,
                },
            );
        }
        token
    }

    /// Resolve a presented token to its username, if still valid.
    pub fn resolve(&self, token: &str) -> Option<Username> {
        let map = self.inner.lock().ok()?;
        let session = map.get(token)?;
        if session.expires <= Instant::now() {
            return None;
        }
        Some(session.username.clone())
    }

    /// Drop a token. Unknown tokens are a no-op.
    pub fn revoke(&self, token: &str) {
        if let Ok(mut map) = self.inner.lock() {
            map.remove(token);
        }
    }
}
