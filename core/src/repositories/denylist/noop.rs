//! No-op implementation of TokenDenylist for when revocation is not needed

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::TokenResult;

use super::r#trait::TokenDenylist;

/// No-op implementation of TokenDenylist
///
/// This implementation never revokes anything and is used by deployments
/// that rely on natural token expiry alone.
pub struct NoOpDenylist;

impl NoOpDenylist {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NoOpDenylist {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenDenylist for NoOpDenylist {
    async fn add(&self, _jti: &str, _expires_at: DateTime<Utc>) -> TokenResult<()> {
        // No-op implementation - just return success
        Ok(())
    }

    async fn contains(&self, _jti: &str) -> TokenResult<bool> {
        // Nothing is ever revoked
        Ok(false)
    }

    async fn purge_expired(&self) -> TokenResult<usize> {
        Ok(0)
    }
}
