//! In-memory caching using moka
//!
//! Package pricing configuration changes rarely compared to how often it is
//! read, so per-package snapshots are cached with a short TTL. Staff edits in
//! the main application are picked up on expiry or through the explicit
//! invalidation endpoint.

use moka::future::Cache;
use serde::Serialize;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use uuid::Uuid;

use crate::pricing::models::PricingSnapshot;

/// Application cache holding per-package pricing snapshots
#[derive(Clone)]
pub struct AppCache {
    /// Pricing snapshots (package id -> snapshot)
    pub snapshots: Cache<Uuid, Arc<PricingSnapshot>>,
}

impl AppCache {
    /// Create a new cache instance with configured TTLs
    pub fn new() -> Self {
        Self {
            // Snapshots: 1000 packages, 5 min TTL, 2 min idle
            snapshots: Cache::builder()
                .max_capacity(1000)
                .time_to_live(Duration::from_secs(5 * 60))
                .time_to_idle(Duration::from_secs(2 * 60))
                .build(),
        }
    }

    /// Get cache statistics for monitoring
    pub fn stats(&self) -> CacheStats {
        CacheStats {
            snapshots_size: self.snapshots.entry_count(),
        }
    }

    /// Invalidate the snapshot of a single package
    pub async fn invalidate_package(&self, package_id: Uuid) {
        self.snapshots.invalidate(&package_id).await;
        info!("Pricing snapshot invalidated for package {}", package_id);
    }

    /// Invalidate all caches
    pub fn invalidate_all(&self) {
        self.snapshots.invalidate_all();
        info!("All pricing snapshots invalidated");
    }
}

impl Default for AppCache {
    fn default() -> Self {
        Self::new()
    }
}

/// Cache statistics for the monitoring endpoint
#[derive(Debug, Clone, Serialize)]
pub struct CacheStats {
    pub snapshots_size: u64,
}
