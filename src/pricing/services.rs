//! Pricing service functions with database access.
//!
//! These load the per-package pricing snapshot (cache first, database on
//! miss) and hand it to the pure calculation core.

use chrono::NaiveDate;
use futures::future::join_all;
use rust_decimal::Decimal;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use crate::cache::AppCache;
use crate::error::AppError;

use super::calculators::{self, GroupPriceInput, GroupPriceResult, PricingError};
use super::models::{MealPlan, PriceType, PricingSnapshot};
use super::queries;

/// Batch fan-out width for multi-package calculations
const BATCH_SIZE: usize = 5;

/// Load a package's pricing snapshot, read-through via the cache.
///
/// A package id that matches no row maps to `PackageNotEligible` - callers
/// cannot distinguish a missing package from an ineligible one, by contract.
pub async fn load_snapshot(
    pool: &PgPool,
    cache: &AppCache,
    package_id: Uuid,
) -> Result<Arc<PricingSnapshot>, AppError> {
    if let Some(snapshot) = cache.snapshots.get(&package_id).await {
        return Ok(snapshot);
    }

    let package = queries::get_package_info(pool, package_id)
        .await?
        .ok_or(PricingError::PackageNotEligible)?;

    let (intervals, room_types, hotel_prices, policies) = tokio::try_join!(
        queries::get_price_intervals(pool, package_id),
        queries::get_room_types(pool, package_id),
        queries::get_hotel_prices(pool, package_id),
        queries::get_children_policies(pool, package_id),
    )?;

    let snapshot = Arc::new(PricingSnapshot {
        package,
        intervals,
        room_types,
        hotel_prices,
        policies,
    });

    cache
        .snapshots
        .insert(package_id, snapshot.clone())
        .await;

    Ok(snapshot)
}

/// Calculate the group price for one package.
pub async fn calculate_group_price(
    pool: &PgPool,
    cache: &AppCache,
    package_id: Uuid,
    input: &GroupPriceInput,
) -> Result<GroupPriceResult, AppError> {
    let snapshot = load_snapshot(pool, cache, package_id).await?;
    let result = calculators::calculate_group_price(input, &snapshot)?;
    Ok(result)
}

/// Result of the per-date price lookup (admin quoting view)
#[derive(Debug, Clone)]
pub struct PriceForDateResult {
    pub price_per_person: Decimal,
    pub interval_name: Option<String>,
    pub price_type: PriceType,
    pub currency: String,
}

/// Look up the raw configured per-person price for a single date, room type,
/// and meal plan, without party composition.
pub async fn price_for_date(
    pool: &PgPool,
    cache: &AppCache,
    package_id: Uuid,
    date: NaiveDate,
    room_type_id: Uuid,
    meal_plan: MealPlan,
) -> Result<PriceForDateResult, AppError> {
    let snapshot = load_snapshot(pool, cache, package_id).await?;
    let result = price_for_date_from_snapshot(&snapshot, date, room_type_id, meal_plan)?;
    Ok(result)
}

/// Pure part of the per-date lookup, over an already-loaded snapshot.
///
/// A room_type_id from another package is a caller mistake (`InvalidInput`),
/// same as in the group calculation path; `RoomNotConfiguredForInterval` is
/// reserved for genuine gaps in the price matrix.
fn price_for_date_from_snapshot(
    snapshot: &PricingSnapshot,
    date: NaiveDate,
    room_type_id: Uuid,
    meal_plan: MealPlan,
) -> Result<PriceForDateResult, PricingError> {
    let package = &snapshot.package;
    if !package.is_on_request() || !package.is_sellable() {
        return Err(PricingError::PackageNotEligible);
    }

    if !snapshot.room_types.iter().any(|rt| rt.id == room_type_id) {
        return Err(PricingError::invalid_input(format!(
            "room type {room_type_id} does not belong to package"
        )));
    }

    let interval = calculators::resolve_interval(date, &snapshot.intervals)?;
    let price_per_person =
        calculators::lookup_base_price(interval, room_type_id, meal_plan, &snapshot.hotel_prices)?;

    Ok(PriceForDateResult {
        price_per_person,
        interval_name: interval.name.clone(),
        price_type: package.price_type(),
        currency: package.currency().to_string(),
    })
}

/// One package's outcome in a batch calculation
#[derive(Debug, Clone)]
pub struct BatchPackagePrice {
    pub package_id: Uuid,
    pub calculated_total: Option<Decimal>,
    pub calculated_per_person: Option<Decimal>,
    pub price_error: Option<String>,
}

/// Calculate totals for many packages with a shared party input.
///
/// Best-effort per package: a failure for one package becomes its
/// price_error and never aborts the rest. Used by the results page to show
/// calculated totals next to each package.
pub async fn calculate_prices_for_packages(
    pool: &PgPool,
    cache: &AppCache,
    package_ids: &[Uuid],
    input: &GroupPriceInput,
) -> Vec<BatchPackagePrice> {
    let mut results = Vec::with_capacity(package_ids.len());

    for chunk in package_ids.chunks(BATCH_SIZE) {
        let chunk_results = join_all(chunk.iter().map(|&package_id| async move {
            match calculate_group_price(pool, cache, package_id, input).await {
                Ok(result) => BatchPackagePrice {
                    package_id,
                    calculated_total: Some(result.total),
                    calculated_per_person: Some(result.per_person_avg),
                    price_error: None,
                },
                Err(e) => BatchPackagePrice {
                    package_id,
                    calculated_total: None,
                    calculated_per_person: None,
                    price_error: Some(e.to_string()),
                },
            }
        }))
        .await;

        results.extend(chunk_results);
    }

    results
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::models::{HotelPrice, PackageInfo, PriceInterval, RoomType};
    use rust_decimal_macros::dec;

    fn date(s: &str) -> NaiveDate {
        s.parse().unwrap()
    }

    fn snapshot() -> PricingSnapshot {
        let room = RoomType {
            id: Uuid::new_v4(),
            code: "1/2".to_string(),
            name: "Room 1/2".to_string(),
            max_persons: 2,
            sort_order: 0,
        };
        let interval = PriceInterval {
            id: Uuid::new_v4(),
            name: Some("Jun-Avg".to_string()),
            start_date: date("2025-06-01"),
            end_date: date("2025-08-31"),
            sort_order: 0,
        };
        let price = HotelPrice {
            id: Uuid::new_v4(),
            interval_id: interval.id,
            room_type_id: room.id,
            price_nd: None,
            price_bb: Some(dec!(100)),
            price_hb: None,
            price_fb: None,
            price_ai: None,
        };
        PricingSnapshot {
            package: PackageInfo {
                id: Uuid::new_v4(),
                package_type: "na_upit".to_string(),
                price_type: Some("per_person_per_night".to_string()),
                currency: Some("EUR".to_string()),
                is_active: true,
                status: "active".to_string(),
            },
            intervals: vec![interval],
            room_types: vec![room],
            hotel_prices: vec![price],
            policies: vec![],
        }
    }

    #[test]
    fn test_price_for_date_returns_raw_configured_price() {
        let snapshot = snapshot();
        let room_id = snapshot.room_types[0].id;

        let result = price_for_date_from_snapshot(
            &snapshot,
            date("2025-07-15"),
            room_id,
            MealPlan::BedBreakfast,
        )
        .unwrap();

        // Raw per-person amount, not scaled by any duration.
        assert_eq!(result.price_per_person, dec!(100));
        assert_eq!(result.interval_name.as_deref(), Some("Jun-Avg"));
        assert_eq!(result.price_type, PriceType::PerPersonPerNight);
        assert_eq!(result.currency, "EUR");
    }

    #[test]
    fn test_price_for_date_rejects_foreign_room_type() {
        let snapshot = snapshot();

        // A room id from another package is a caller mistake, not a
        // price-matrix gap.
        let err = price_for_date_from_snapshot(
            &snapshot,
            date("2025-07-15"),
            Uuid::new_v4(),
            MealPlan::BedBreakfast,
        )
        .unwrap_err();
        assert!(matches!(err, PricingError::InvalidInput { .. }));
    }

    #[test]
    fn test_price_for_date_ineligible_package() {
        let mut snapshot = snapshot();
        snapshot.package.package_type = "fiksni".to_string();
        let room_id = snapshot.room_types[0].id;

        let err = price_for_date_from_snapshot(
            &snapshot,
            date("2025-07-15"),
            room_id,
            MealPlan::BedBreakfast,
        )
        .unwrap_err();
        assert_eq!(err, PricingError::PackageNotEligible);
    }
}
