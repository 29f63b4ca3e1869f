//! Periodic maintenance of the revocation denylist
//!
//! Denylist entries are only meaningful until their token's natural
//! expiry; this module drops the lapsed ones so the store stays bounded.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::errors::TokenError;
use crate::repositories::TokenDenylist;

/// Configuration for denylist cleanup
#[derive(Debug, Clone)]
pub struct DenylistCleanupConfig {
    /// How often to run cleanup (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for DenylistCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 3600, // Run every hour
            enabled: true,
        }
    }
}

/// Service that purges lapsed entries from a denylist
pub struct DenylistCleanup<D: TokenDenylist + 'static> {
    denylist: Arc<D>,
    config: DenylistCleanupConfig,
}

impl<D: TokenDenylist> DenylistCleanup<D> {
    /// Create a new cleanup service over a shared denylist
    pub fn new(denylist: Arc<D>, config: DenylistCleanupConfig) -> Self {
        Self { denylist, config }
    }

    /// Run a single cleanup cycle
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of lapsed entries dropped
    /// * `Err(TokenError)` - If the store rejected the purge
    pub async fn run_cleanup(&self) -> Result<usize, TokenError> {
        if !self.config.enabled {
            return Ok(0);
        }

        let purged = self.denylist.purge_expired().await?;
        if purged > 0 {
            info!("Purged {} lapsed denylist entries", purged);
        }

        Ok(purged)
    }

    /// Start the cleanup service as a background task
    ///
    /// This spawns a tokio task that runs cleanup at regular intervals
    pub fn start_background_task(self: Arc<Self>) {
        if !self.config.enabled {
            warn!("Denylist cleanup service is disabled");
            return;
        }

        let interval = std::time::Duration::from_secs(self.config.interval_seconds);

        tokio::spawn(async move {
            info!(
                "Denylist cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                if let Err(e) = self.run_cleanup().await {
                    error!("Denylist cleanup cycle failed: {}", e);
                }
            }
        });
    }
}
