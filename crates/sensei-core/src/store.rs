//! Best-effort server-side session cache.
//!
//! The client's echoed state is authoritative; this store only backs requests
//! that arrive without one. Implementations may be non-durable and are not
//! required to be consistent across server instances.

use anyhow::Result;
use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::state::Session;

/// Keyed session storage. Concurrent writers for the same id: last write wins.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: &str) -> Result<Option<Session>>;
    async fn put(&self, id: &str, session: &Session) -> Result<()>;
}

/// Process-local store. Sessions live until the process exits.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    sessions: RwLock<HashMap<String, Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.is_empty()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self, id: &str) -> Result<Option<Session>> {
        Ok(self.sessions.read().await.get(id).cloned())
    }

    async fn put(&self, id: &str, session: &Session) -> Result<()> {
        self.sessions
            .write()
            .await
            .insert(id.to_string(), session.clone());
        Ok(())
    }
}
