//! Database queries for the pricing engine.
//!
//! The pricing tables are owned by the main application; this service only
//! reads them. All queries use sqlx query_as with FromRow models.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::AppError;

use super::models::{ChildrenPolicyRule, HotelPrice, PackageInfo, PriceInterval, RoomType};

/// Get the pricing-relevant fields of a package
pub async fn get_package_info(pool: &PgPool, package_id: Uuid) -> Result<Option<PackageInfo>, AppError> {
    let package = sqlx::query_as::<_, PackageInfo>(
        r#"
        SELECT id, package_type, price_type, currency, is_active, status
        FROM packages
        WHERE id = $1
        "#,
    )
    .bind(package_id)
    .fetch_optional(pool)
    .await?;

    Ok(package)
}

/// Get all price intervals of a package
pub async fn get_price_intervals(
    pool: &PgPool,
    package_id: Uuid,
) -> Result<Vec<PriceInterval>, AppError> {
    let intervals = sqlx::query_as::<_, PriceInterval>(
        r#"
        SELECT id, name, start_date, end_date, sort_order
        FROM price_intervals
        WHERE package_id = $1
        ORDER BY sort_order, start_date
        "#,
    )
    .bind(package_id)
    .fetch_all(pool)
    .await?;

    Ok(intervals)
}

/// Get all room types of a package
pub async fn get_room_types(pool: &PgPool, package_id: Uuid) -> Result<Vec<RoomType>, AppError> {
    let room_types = sqlx::query_as::<_, RoomType>(
        r#"
        SELECT id, code, name, max_persons, sort_order
        FROM room_types
        WHERE package_id = $1
        ORDER BY sort_order, max_persons
        "#,
    )
    .bind(package_id)
    .fetch_all(pool)
    .await?;

    Ok(room_types)
}

/// Get the full price matrix of a package (all intervals and room types)
pub async fn get_hotel_prices(pool: &PgPool, package_id: Uuid) -> Result<Vec<HotelPrice>, AppError> {
    let prices = sqlx::query_as::<_, HotelPrice>(
        r#"
        SELECT id, interval_id, room_type_id,
               price_nd, price_bb, price_hb, price_fb, price_ai
        FROM hotel_prices
        WHERE package_id = $1
        "#,
    )
    .bind(package_id)
    .fetch_all(pool)
    .await?;

    Ok(prices)
}

/// Get the children policy rules of a package, lowest sort_order first
pub async fn get_children_policies(
    pool: &PgPool,
    package_id: Uuid,
) -> Result<Vec<ChildrenPolicyRule>, AppError> {
    let policies = sqlx::query_as::<_, ChildrenPolicyRule>(
        r#"
        SELECT id, rule_name, label, sort_order,
               age_from, age_to, discount_type, discount_value,
               min_adults, max_adults, child_position, room_type_codes, bed_type
        FROM children_policy_rules
        WHERE package_id = $1
        ORDER BY sort_order, age_from
        "#,
    )
    .bind(package_id)
    .fetch_all(pool)
    .await?;

    Ok(policies)
}
