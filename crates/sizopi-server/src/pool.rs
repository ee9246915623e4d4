// SPDX-License-Identifier: Apache-2.0

//! Tiny checkout/checkin pool over `rusqlite` connections.
//!
//! A handler borrows one connection for the life of its request; idle
//! connections above `max_idle` are dropped on checkin rather than kept.

use rusqlite::Connection;
use std::fmt::{Display, Formatter};
use std::ops::{Deref, DerefMut};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub struct PoolError(pub String);

impl Display for PoolError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::error::Error for PoolError {}

struct PoolInner {
    path: PathBuf,
    idle: Mutex<Vec<Connection>>,
    max_idle: usize,
}

#[derive(Clone)]
pub struct DbPool {
    inner: Arc<PoolInner>,
}

impl DbPool {
    /// Open the pool, verifying the database file is usable by opening
    /// (and keeping) one configured connection.
    pub fn open(path: &Path, max_idle: usize) -> Result<Self, PoolError> {
        let inner = Arc::new(PoolInner {
            path: path.to_path_buf(),
            idle: Mutex::new(Vec::new()),
            max_idle: max_idle.max(1),
        });
        let pool = Self { inner };
        let first = pool.connect()?;
        pool.checkin(first);
        Ok(pool)
    }

    fn connect(&self) -> Result<Connection, PoolError> {
        let conn = Connection::open(&self.inner.path)
            .map_err(|e| PoolError(format!("open {:?}: {e}", self.inner.path)))?;
        conn.execute_batch(
            "PRAGMA foreign_keys = ON;
             PRAGMA journal_mode = WAL;
             PRAGMA synchronous = NORMAL;
             PRAGMA busy_timeout = 5000;",
        )
        .map_err(|e| PoolError(format!("configure connection: {e}")))?;
        Ok(conn)
    }

    pub fn checkout(&self) -> Result<PooledConn, PoolError> {
        let reused = {
            let mut idle = self
                .inner
                .idle
                .lock()
                .map_err(|_| PoolError("pool lock poisoned".to_string()))?;
            idle.pop()
        };
        let conn = match reused {
            Some(conn) => conn,
            None => self.connect()?,
        };
        Ok(PooledConn {
            conn: Some(conn),
            pool: Arc::clone(&self.inner),
        })
    }

    fn checkin(&self, conn: Connection) {
        if let Ok(mut idle) = self.inner.idle.lock() {
            if idle.len() < self.inner.max_idle {
                idle.push(conn);
            }
        }
    }
}

pub struct PooledConn {
    conn: Option<Connection>,
    pool: Arc<PoolInner>,
}

impl Deref for PooledConn {
    type Target = Connection;

    fn deref(&self) -> &Connection {
        // `conn` is only None after Drop has run.
        match self.conn.as_ref() {
            Some(conn) => conn,
            None => unreachable!("connection already returned"),
        }
    }
}

impl DerefMut for PooledConn {
    fn deref_mut(&mut self) -> &mut Connection {
        match self.conn.as_mut() {
            Some(conn) => conn,
            None => unreachable!("connection already returned"),
        }
    }
}

impl Drop for PooledConn {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Ok(mut idle) = self.pool.idle.lock() {
                if idle.len() < self.pool.max_idle {
                    idle.push(conn);
                }
            }
        }
    }
}
