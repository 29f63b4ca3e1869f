//! Denylist trait defining the interface for pre-expiry token revocation.

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::errors::TokenResult;

/// Capability interface for the revocation store.
///
/// The denylist is the one piece of shared mutable state in the token
/// subsystem: signing and verification are pure, but a revocation written
/// here must be visible to every verification that starts afterwards
/// (read-your-writes). Any atomic set-membership store satisfies that:
/// the in-process implementation in this crate for single-process
/// deployments, or an external cache behind the same trait for
/// multi-process ones.
///
/// Entries are keyed by the token's `jti` claim. Once the token's natural
/// expiry passes, the entry is dead weight and may be dropped.
#[async_trait]
pub trait TokenDenylist: Send + Sync {
    /// Record a token ID as revoked until its natural expiry.
    ///
    /// # Arguments
    /// * `jti` - The token's unique ID claim
    /// * `expires_at` - The token's own expiry; the entry is useless beyond it
    async fn add(&self, jti: &str, expires_at: DateTime<Utc>) -> TokenResult<()>;

    /// Check whether a token ID has been revoked.
    ///
    /// Implementations must treat entries past their expiry as absent, so
    /// the answer converges with the token's own `exp` check.
    async fn contains(&self, jti: &str) -> TokenResult<bool>;

    /// Drop entries whose tokens have expired on their own.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries removed
    async fn purge_expired(&self) -> TokenResult<usize>;
}
