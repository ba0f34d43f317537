//! Pricing service for the travel agency platform.
//!
//! Reads package pricing configuration from the shared Postgres database
//! and serves group price calculations for on-request hotel packages.

pub mod cache;
pub mod error;
pub mod pricing;

use sqlx::PgPool;

use cache::AppCache;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub cache: AppCache,
}
