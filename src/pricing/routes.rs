//! Pricing route handlers

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use uuid::Uuid;

use crate::cache::CacheStats;
use crate::error::Result;
use crate::AppState;

use super::requests::{BatchCalculateRequest, CalculatePriceQuery, PriceForDateQuery};
use super::responses::{
    BatchCalculateResponse, GroupPriceResponse, PriceForDateResponse,
};
use super::services;

/// Pricing API router, nested under /api/pricing
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/calculate", get(calculate_price))
        .route("/calculate-batch", post(calculate_batch))
        .route("/packages/:package_id/price-for-date", get(price_for_date))
        .route("/cache/stats", get(cache_stats))
        .route("/cache/invalidate/:package_id", post(invalidate_package))
}

/// Group price calculation for one package
async fn calculate_price(
    State(state): State<AppState>,
    Query(query): Query<CalculatePriceQuery>,
) -> Result<Json<GroupPriceResponse>> {
    let (package_id, input) = query.into_input()?;

    tracing::debug!(
        %package_id,
        adults = input.adults,
        children = input.child_ages.len(),
        date = %input.date,
        "calculating group price"
    );

    let result =
        services::calculate_group_price(&state.db, &state.cache, package_id, &input).await?;

    Ok(Json(result.into()))
}

/// Raw per-person price for a date, room type, and meal plan
async fn price_for_date(
    State(state): State<AppState>,
    Path(package_id): Path<Uuid>,
    Query(query): Query<PriceForDateQuery>,
) -> Result<Json<PriceForDateResponse>> {
    let meal_plan = query.meal_plan()?;

    let result = services::price_for_date(
        &state.db,
        &state.cache,
        package_id,
        query.date,
        query.room_type_id,
        meal_plan,
    )
    .await?;

    Ok(Json(result.into()))
}

/// Batch calculation over many packages with a shared party input
async fn calculate_batch(
    State(state): State<AppState>,
    Json(request): Json<BatchCalculateRequest>,
) -> Result<Json<BatchCalculateResponse>> {
    let (package_ids, input) = request.into_input()?;

    let results =
        services::calculate_prices_for_packages(&state.db, &state.cache, &package_ids, &input)
            .await;

    Ok(Json(BatchCalculateResponse {
        results: results.into_iter().map(Into::into).collect(),
    }))
}

/// Snapshot cache statistics for monitoring
async fn cache_stats(State(state): State<AppState>) -> Json<CacheStats> {
    Json(state.cache.stats())
}

/// Drop a package's cached snapshot after staff edit its pricing
async fn invalidate_package(
    State(state): State<AppState>,
    Path(package_id): Path<Uuid>,
) -> Json<serde_json::Value> {
    state.cache.invalidate_package(package_id).await;
    Json(serde_json::json!({ "invalidated": package_id }))
}
