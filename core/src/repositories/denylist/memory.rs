//! In-memory denylist for single-process deployments.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::errors::TokenResult;

use super::r#trait::TokenDenylist;

/// Denylist backed by a process-local map.
///
/// Cloning shares the underlying store, so the token service and the
/// cleanup task can hold the same denylist.
#[derive(Clone)]
pub struct InMemoryDenylist {
    entries: Arc<RwLock<HashMap<String, DateTime<Utc>>>>,
}

impl InMemoryDenylist {
    /// Create an empty denylist
    pub fn new() -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of entries currently held, including lapsed ones
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the store holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

impl Default for InMemoryDenylist {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenDenylist for InMemoryDenylist {
    async fn add(&self, jti: &str, expires_at: DateTime<Utc>) -> TokenResult<()> {
        let mut entries = self.entries.write().await;
        entries.insert(jti.to_string(), expires_at);
        Ok(())
    }

    async fn contains(&self, jti: &str) -> TokenResult<bool> {
        let entries = self.entries.read().await;
        // Lapsed entries count as absent; natural expiry has taken over
        Ok(entries
            .get(jti)
            .map(|expires_at| *expires_at > Utc::now())
            .unwrap_or(false))
    }

    async fn purge_expired(&self) -> TokenResult<usize> {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, expires_at| *expires_at > Utc::now());
        Ok(before - entries.len())
    }
}
