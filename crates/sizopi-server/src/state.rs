// SPDX-License-Identifier: Apache-2.0

use crate::config::ServerConfig;
use crate::pool::{DbPool, PoolError};
use crate::session::SessionStore;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Shared handler state: connection pool, session store, request-id seed.
#[derive(Clone)]
pub struct AppState {
    pub pool: DbPool,
    pub sessions: Arc<SessionStore>,
    request_seed: Arc<AtomicU64>,
}

impl AppState {
    pub fn from_config(cfg: &ServerConfig) -> Result<Self, PoolError> {
        let pool = DbPool::open(&cfg.db_path, cfg.pool_max_idle)?;
        Ok(Self {
            pool,
            sessions: Arc::new(SessionStore::new(cfg.session_ttl)),
            request_seed: Arc::new(AtomicU64::new(0)),
        })
    }

    #[must_use]
    pub fn next_request_id(&self) -> String {
        let n = self.request_seed.fetch_add(1, Ordering::Relaxed);
        format!("req-{n}")
    }
}
