//! Periodic cleanup of expired verification requests.
//!
//! Expired rows are never trusted by the verification path, but they stay
//! in the table until this sweep removes them.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tracing::info;

use crate::errors::DomainResult;
use crate::repositories::VerificationRepository;

/// Configuration for the cleanup sweep
#[derive(Debug, Clone)]
pub struct CleanupConfig {
    /// How often to run the sweep, in seconds
    pub interval_seconds: u64,
    /// Whether the sweep is enabled
    pub enabled: bool,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 600,
            enabled: true,
        }
    }
}

/// Service that deletes expired verification requests.
pub struct VerificationCleanupService<V: VerificationRepository> {
    repository: Arc<V>,
    config: CleanupConfig,
}

impl<V: VerificationRepository> VerificationCleanupService<V> {
    /// Create a new cleanup service
    pub fn new(repository: Arc<V>, config: CleanupConfig) -> Self {
        Self { repository, config }
    }

    /// The configured sweep interval
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.config.interval_seconds)
    }

    /// Run a single cleanup cycle. Returns the number of rows removed.
    pub async fn run_cleanup(&self) -> DomainResult<u64> {
        if !self.config.enabled {
            return Ok(0);
        }

        let deleted = self.repository.delete_expired(Utc::now()).await?;
        if deleted > 0 {
            info!(
                deleted = deleted,
                event = "verification_cleanup",
                "Removed expired verification codes"
            );
        }
        Ok(deleted)
    }
}
