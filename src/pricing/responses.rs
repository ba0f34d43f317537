//! Response DTOs for the pricing API endpoints.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use uuid::Uuid;

use super::calculators::{ChildPriceDetail, GroupPriceResult};
use super::models::{DiscountType, MealPlan};
use super::services::{BatchPackagePrice, PriceForDateResult};

/// Resolved interval reference in the breakdown
#[derive(Debug, Serialize)]
pub struct IntervalResponse {
    pub id: Uuid,
    pub name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

/// Selected room type reference in the breakdown
#[derive(Debug, Serialize)]
pub struct RoomTypeResponse {
    pub id: Uuid,
    pub code: String,
    pub name: String,
}

/// One child's line in the breakdown
#[derive(Debug, Serialize)]
pub struct ChildPriceDetailResponse {
    pub age: i32,
    pub position: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub original_price: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub discounted_price: Decimal,
    pub discount_type: Option<DiscountType>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub discount_value: Option<Decimal>,
    pub rule_name: Option<String>,
    pub is_free: bool,
}

impl From<ChildPriceDetail> for ChildPriceDetailResponse {
    fn from(detail: ChildPriceDetail) -> Self {
        Self {
            age: detail.age,
            position: detail.position,
            original_price: detail.original_price,
            discounted_price: detail.discounted_price,
            discount_type: detail.discount_type,
            discount_value: detail.discount_value,
            rule_name: detail.rule_name,
            is_free: detail.is_free,
        }
    }
}

/// Full group price breakdown returned to the caller
#[derive(Debug, Serialize)]
pub struct GroupPriceResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub total: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub per_person_avg: Decimal,
    pub currency: String,
    pub interval: IntervalResponse,
    pub room_type: RoomTypeResponse,
    pub meal_plan: MealPlan,
    pub price_type: String,
    pub duration_nights: i32,
    pub adults_count: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub adult_price_per_person: Decimal,
    #[serde(with = "rust_decimal::serde::str")]
    pub adults_total: Decimal,
    pub children_count: i32,
    #[serde(with = "rust_decimal::serde::str")]
    pub children_total: Decimal,
    pub children: Vec<ChildPriceDetailResponse>,
}

impl From<GroupPriceResult> for GroupPriceResponse {
    fn from(result: GroupPriceResult) -> Self {
        Self {
            total: result.total,
            per_person_avg: result.per_person_avg,
            currency: result.currency,
            interval: IntervalResponse {
                id: result.interval_id,
                name: result.interval_name,
                start_date: result.interval_start,
                end_date: result.interval_end,
            },
            room_type: RoomTypeResponse {
                id: result.room_type_id,
                code: result.room_type_code,
                name: result.room_type_name,
            },
            meal_plan: result.meal_plan,
            price_type: result.price_type.as_str().to_string(),
            duration_nights: result.duration_nights,
            adults_count: result.adults_count,
            adult_price_per_person: result.adult_price_per_person,
            adults_total: result.adults_total,
            children_count: result.children_count,
            children_total: result.children_total,
            children: result.children.into_iter().map(Into::into).collect(),
        }
    }
}

/// Response for the per-date price lookup
#[derive(Debug, Serialize)]
pub struct PriceForDateResponse {
    #[serde(with = "rust_decimal::serde::str")]
    pub price_per_person: Decimal,
    pub interval_name: Option<String>,
    pub price_type: String,
    pub currency: String,
}

impl From<PriceForDateResult> for PriceForDateResponse {
    fn from(result: PriceForDateResult) -> Self {
        Self {
            price_per_person: result.price_per_person,
            interval_name: result.interval_name,
            price_type: result.price_type.as_str().to_string(),
            currency: result.currency,
        }
    }
}

/// One package's entry in a batch calculation response
#[derive(Debug, Serialize)]
pub struct PackagePriceResponse {
    pub package_id: Uuid,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub calculated_total: Option<Decimal>,
    #[serde(with = "rust_decimal::serde::str_option")]
    pub calculated_per_person: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_error: Option<String>,
}

impl From<BatchPackagePrice> for PackagePriceResponse {
    fn from(price: BatchPackagePrice) -> Self {
        Self {
            package_id: price.package_id,
            calculated_total: price.calculated_total,
            calculated_per_person: price.calculated_per_person,
            price_error: price.price_error,
        }
    }
}

/// Response for the batch calculation endpoint
#[derive(Debug, Serialize)]
pub struct BatchCalculateResponse {
    pub results: Vec<PackagePriceResponse>,
}
