//! Pricing engine for on-request (na_upit) hotel packages.
//!
//! The main application calls this service over HTTP/JSON for group price
//! calculations: interval resolution, the room/meal-plan price matrix, and
//! age-banded children discount policies.

pub mod calculators;
pub mod models;
pub mod queries;
pub mod requests;
pub mod responses;
pub mod routes;
pub mod services;

// Re-export commonly used items
pub use calculators::{round_money, GroupPriceInput, GroupPriceResult, PricingError};
pub use routes::router;
pub use services::{BatchPackagePrice, PriceForDateResult};
