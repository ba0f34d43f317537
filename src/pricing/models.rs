//! Database models and domain enums for the pricing engine.
//!
//! Row types use sqlx's FromRow derive for direct database deserialization.
//! Enum-like text columns stay strings in the rows and are parsed into
//! domain enums where the calculation needs them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Meal plan codes for hotel packages.
///
/// Fixed enumeration; any other code is rejected at input validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MealPlan {
    /// ND - no meals
    #[serde(rename = "ND")]
    NoMeals,
    /// BB - bed & breakfast
    #[serde(rename = "BB")]
    BedBreakfast,
    /// HB - half board
    #[serde(rename = "HB")]
    HalfBoard,
    /// FB - full board
    #[serde(rename = "FB")]
    FullBoard,
    /// AI - all inclusive
    #[serde(rename = "AI")]
    AllInclusive,
}

impl MealPlan {
    /// Parse a meal plan code (case-insensitive).
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_uppercase().as_str() {
            "ND" => Some(Self::NoMeals),
            "BB" => Some(Self::BedBreakfast),
            "HB" => Some(Self::HalfBoard),
            "FB" => Some(Self::FullBoard),
            "AI" => Some(Self::AllInclusive),
            _ => None,
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Self::NoMeals => "ND",
            Self::BedBreakfast => "BB",
            Self::HalfBoard => "HB",
            Self::FullBoard => "FB",
            Self::AllInclusive => "AI",
        }
    }
}

impl std::fmt::Display for MealPlan {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_code())
    }
}

/// Children discount type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DiscountType {
    Free,
    Percent,
    Fixed,
}

impl DiscountType {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_uppercase().as_str() {
            "FREE" => Some(Self::Free),
            "PERCENT" => Some(Self::Percent),
            "FIXED" => Some(Self::Fixed),
            _ => None,
        }
    }
}

/// Bed arrangement a children policy rule can require.
///
/// Fixed enumeration; any other code is rejected at input validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BedType {
    Any,
    Separate,
    Shared,
}

impl BedType {
    /// Parse a bed type code (case-insensitive).
    pub fn parse(code: &str) -> Option<Self> {
        match code.to_ascii_lowercase().as_str() {
            "any" => Some(Self::Any),
            "separate" => Some(Self::Separate),
            "shared" => Some(Self::Shared),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Any => "any",
            Self::Separate => "separate",
            Self::Shared => "shared",
        }
    }
}

/// Whether configured prices are per night or for the whole stay.
///
/// Determines how duration scales the per-adult unit price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceType {
    PerPersonPerNight,
    PerPersonPerStay,
}

impl PriceType {
    /// Parse the stored price_type; unknown values fall back to per-stay,
    /// the original default for imported packages.
    pub fn parse_or_default(s: &str) -> Self {
        match s {
            "per_person_per_night" => Self::PerPersonPerNight,
            _ => Self::PerPersonPerStay,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PerPersonPerNight => "per_person_per_night",
            Self::PerPersonPerStay => "per_person_per_stay",
        }
    }
}

/// Package row from packages (only the fields pricing needs)
#[derive(Debug, Clone, FromRow)]
pub struct PackageInfo {
    pub id: Uuid,
    pub package_type: String,
    pub price_type: Option<String>,
    pub currency: Option<String>,
    pub is_active: bool,
    pub status: String,
}

impl PackageInfo {
    /// On-request (na_upit) packages are the only ones priced by this engine.
    pub fn is_on_request(&self) -> bool {
        self.package_type == "na_upit"
    }

    pub fn is_sellable(&self) -> bool {
        self.is_active && self.status == "active"
    }

    pub fn price_type(&self) -> PriceType {
        self.price_type
            .as_deref()
            .map(PriceType::parse_or_default)
            .unwrap_or(PriceType::PerPersonPerStay)
    }

    pub fn currency(&self) -> &str {
        self.currency.as_deref().unwrap_or("EUR")
    }
}

/// Price interval row from price_intervals.
///
/// A contiguous date range (end date inclusive) during which the package's
/// base room rates are fixed.
#[derive(Debug, Clone, FromRow)]
pub struct PriceInterval {
    pub id: Uuid,
    pub name: Option<String>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub sort_order: i32,
}

impl PriceInterval {
    /// Whether the interval covers the given date (inclusive on both ends).
    pub fn covers(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    /// Interval width in days, used as the specificity measure when
    /// overlapping intervals cover the same date.
    pub fn span_days(&self) -> i64 {
        (self.end_date - self.start_date).num_days()
    }
}

/// Room type row from room_types
#[derive(Debug, Clone, FromRow)]
pub struct RoomType {
    pub id: Uuid,
    pub code: String,
    pub name: String,
    pub max_persons: i32,
    pub sort_order: i32,
}

/// Price matrix cell from hotel_prices: one row per (interval, room type),
/// holding up to five nullable per-adult meal-plan prices.
#[derive(Debug, Clone, FromRow)]
pub struct HotelPrice {
    pub id: Uuid,
    pub interval_id: Uuid,
    pub room_type_id: Uuid,
    pub price_nd: Option<Decimal>,
    pub price_bb: Option<Decimal>,
    pub price_hb: Option<Decimal>,
    pub price_fb: Option<Decimal>,
    pub price_ai: Option<Decimal>,
}

impl HotelPrice {
    /// The configured price for a meal plan, or None when that column is unset.
    pub fn meal_plan_price(&self, meal_plan: MealPlan) -> Option<Decimal> {
        match meal_plan {
            MealPlan::NoMeals => self.price_nd,
            MealPlan::BedBreakfast => self.price_bb,
            MealPlan::HalfBoard => self.price_hb,
            MealPlan::FullBoard => self.price_fb,
            MealPlan::AllInclusive => self.price_ai,
        }
    }
}

/// Children policy rule row from children_policy_rules.
///
/// Age bands are half-open: a child matches when age_from <= age < age_to,
/// so a child exactly at age_to belongs to the next band. Adjacent bands are
/// authored as e.g. 0-2, 2-12, 12-18.
#[derive(Debug, Clone, FromRow)]
pub struct ChildrenPolicyRule {
    pub id: Uuid,
    pub rule_name: Option<String>,
    pub label: Option<String>,
    pub sort_order: i32,
    pub age_from: i32,
    pub age_to: i32,
    pub discount_type: String,
    pub discount_value: Option<Decimal>,
    pub min_adults: Option<i32>,
    pub max_adults: Option<i32>,
    pub child_position: Option<i32>,
    pub room_type_codes: Option<Vec<String>>,
    pub bed_type: Option<String>,
}

impl ChildrenPolicyRule {
    pub fn discount_type(&self) -> Option<DiscountType> {
        DiscountType::parse(&self.discount_type)
    }

    /// Display name for the price breakdown.
    pub fn display_name(&self) -> String {
        self.rule_name
            .clone()
            .or_else(|| self.label.clone())
            .unwrap_or_else(|| format!("{}-{}", self.age_from, self.age_to))
    }
}

/// Everything the calculator needs for one package, loaded in one pass
/// and shared via Arc through the snapshot cache.
#[derive(Debug, Clone)]
pub struct PricingSnapshot {
    pub package: PackageInfo,
    pub intervals: Vec<PriceInterval>,
    pub room_types: Vec<RoomType>,
    pub hotel_prices: Vec<HotelPrice>,
    pub policies: Vec<ChildrenPolicyRule>,
}
