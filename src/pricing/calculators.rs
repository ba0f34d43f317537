//! Core group-price calculation for on-request (na_upit) hotel packages.
//!
//! Pure functions over an already-loaded pricing snapshot - no database
//! access. Given identical inputs the calculator returns identical outputs,
//! so it is safe to call concurrently from multiple requests.

use chrono::NaiveDate;
use rust_decimal::prelude::*;
use rust_decimal::Decimal;
use uuid::Uuid;

use super::models::{
    BedType, ChildrenPolicyRule, DiscountType, HotelPrice, MealPlan, PriceInterval, PriceType,
    PricingSnapshot, RoomType,
};

/// Oldest age (exclusive) still priced as a child.
pub const MAX_CHILD_AGE: i32 = 18;

/// Typed calculation failures.
///
/// All variants are expected, recoverable-by-caller conditions; the HTTP
/// layer maps them to specific status codes and user-facing messages. No
/// partial price is ever returned.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PricingError {
    #[error("package does not exist or is not an active on-request package")]
    PackageNotEligible,

    #[error("no price interval covers {date}")]
    NoIntervalCovers { date: NaiveDate },

    #[error("room type {room_type_id} has no price row for interval '{interval}'")]
    RoomNotConfiguredForInterval { room_type_id: Uuid, interval: String },

    #[error("meal plan {meal_plan} is not priced for interval '{interval}'")]
    MealPlanNotAvailable { meal_plan: MealPlan, interval: String },

    #[error("invalid input: {message}")]
    InvalidInput { message: String },
}

impl PricingError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: message.into(),
        }
    }

    /// Stable machine-readable tag for JSON error bodies.
    pub fn error_type(&self) -> &'static str {
        match self {
            Self::PackageNotEligible => "package_not_eligible",
            Self::NoIntervalCovers { .. } => "no_interval_covers",
            Self::RoomNotConfiguredForInterval { .. } => "room_not_configured_for_interval",
            Self::MealPlanNotAvailable { .. } => "meal_plan_not_available",
            Self::InvalidInput { .. } => "invalid_input",
        }
    }
}

/// Round to specified decimal places using banker's rounding (ROUND_HALF_EVEN).
///
/// Rounding to the nearest even number at the midpoint reduces cumulative
/// rounding bias across many calculations.
pub fn round_money(amount: Decimal, places: u32) -> Decimal {
    amount.round_dp_with_strategy(places, RoundingStrategy::MidpointNearestEven)
}

/// Resolve the price interval covering a date.
///
/// Overlapping intervals are a realistic admin-data state, not an error:
/// the narrowest covering interval wins, tie-broken by lowest sort_order,
/// then by earliest start date. A date outside every interval fails with
/// `NoIntervalCovers` - there is no default or fallback price.
pub fn resolve_interval(
    date: NaiveDate,
    intervals: &[PriceInterval],
) -> Result<&PriceInterval, PricingError> {
    let mut best: Option<&PriceInterval> = None;

    for interval in intervals.iter().filter(|i| i.covers(date)) {
        best = match best {
            None => Some(interval),
            Some(current) => {
                let candidate_key = (interval.span_days(), interval.sort_order, interval.start_date);
                let current_key = (current.span_days(), current.sort_order, current.start_date);
                if candidate_key < current_key {
                    Some(interval)
                } else {
                    Some(current)
                }
            }
        };
    }

    best.ok_or(PricingError::NoIntervalCovers { date })
}

/// Look up the per-adult unit price for (interval, room type, meal plan).
///
/// Returns the raw configured amount; whether it is per night or per stay
/// is determined by the package's price_type, and the caller scales it.
pub fn lookup_base_price(
    interval: &PriceInterval,
    room_type_id: Uuid,
    meal_plan: MealPlan,
    hotel_prices: &[HotelPrice],
) -> Result<Decimal, PricingError> {
    let interval_name = || {
        interval
            .name
            .clone()
            .unwrap_or_else(|| interval.id.to_string())
    };

    let row = hotel_prices
        .iter()
        .find(|hp| hp.interval_id == interval.id && hp.room_type_id == room_type_id)
        .ok_or_else(|| PricingError::RoomNotConfiguredForInterval {
            room_type_id,
            interval: interval_name(),
        })?;

    row.meal_plan_price(meal_plan)
        .ok_or_else(|| PricingError::MealPlanNotAvailable {
            meal_plan,
            interval: interval_name(),
        })
}

/// Party-level conditions a children policy rule can depend on.
#[derive(Debug, Clone)]
pub struct PartyContext<'a> {
    pub adults: i32,
    pub room_type_code: &'a str,
    pub bed_type: Option<BedType>,
}

/// Find the single children policy rule applying to one child.
///
/// Age bands are half-open: `age_from <= age < age_to`, so a child exactly
/// at age_to falls into the next band. With rules 0-12 and 12-17 a
/// twelve-year-old matches the second rule. Conditions then filter the
/// age matches:
///   - min_adults / max_adults bound the adult count in the party,
///   - child_position bounds the child's 1-based ordinal (a rule with
///     child_position = 1 covers only the first child),
///   - room_type_codes, when non-empty, must list the selected room's code,
///   - bed_type, unless "any", must equal the party's bed type.
///
/// If several rules survive, the lowest sort_order wins (first stored on a
/// tie) - ambiguous configurations are a policy-authoring responsibility and
/// are never averaged or summed. No match means the child pays full adult
/// price.
pub fn resolve_child_rule<'a>(
    age: i32,
    position: i32,
    party: &PartyContext<'_>,
    policies: &'a [ChildrenPolicyRule],
) -> Option<&'a ChildrenPolicyRule> {
    let mut best: Option<&ChildrenPolicyRule> = None;

    for rule in policies {
        if age < rule.age_from || age >= rule.age_to {
            continue;
        }
        if let Some(min_adults) = rule.min_adults {
            if party.adults < min_adults {
                continue;
            }
        }
        if let Some(max_adults) = rule.max_adults {
            if party.adults > max_adults {
                continue;
            }
        }
        if let Some(max_position) = rule.child_position {
            if position > max_position {
                continue;
            }
        }
        if let Some(codes) = &rule.room_type_codes {
            if !codes.is_empty() && !codes.iter().any(|c| c == party.room_type_code) {
                continue;
            }
        }
        if let Some(required) = rule.bed_type.as_deref() {
            match BedType::parse(required) {
                Some(BedType::Any) => {}
                Some(required) => {
                    if party.bed_type != Some(required) {
                        continue;
                    }
                }
                // Unknown stored bed type: the condition can never hold.
                None => continue,
            }
        }

        best = match best {
            None => Some(rule),
            Some(current) if rule.sort_order < current.sort_order => Some(rule),
            Some(current) => Some(current),
        };
    }

    best
}

/// Compute a child's price from a matched rule and the duration-scaled
/// adult price.
///
/// FIXED is an absolute override price for the stay, not a subtraction;
/// a missing discount_value on a FIXED rule falls back to the full adult
/// price, matching the original configuration data.
pub fn child_price(rule: &ChildrenPolicyRule, scaled_adult_price: Decimal) -> Decimal {
    match rule.discount_type() {
        Some(DiscountType::Free) => Decimal::ZERO,
        Some(DiscountType::Percent) => {
            let percent = rule.discount_value.unwrap_or(Decimal::ZERO);
            scaled_adult_price * (Decimal::ONE - percent / Decimal::ONE_HUNDRED)
        }
        Some(DiscountType::Fixed) => rule.discount_value.unwrap_or(scaled_adult_price),
        // Unknown discount type in stored data: charge full price.
        None => scaled_adult_price,
    }
}

/// Pick a room for the party when the request does not name one: the
/// smallest room that fits everyone, or the largest room if none fits.
pub fn select_room_type(room_types: &[RoomType], total_persons: i32) -> Option<&RoomType> {
    room_types
        .iter()
        .filter(|rt| rt.max_persons >= total_persons)
        .min_by_key(|rt| (rt.max_persons, rt.sort_order))
        .or_else(|| room_types.iter().max_by_key(|rt| rt.max_persons))
}

/// Calculator input (already validated at the transport layer where query
/// parsing applies; re-validated here so the core stands alone).
#[derive(Debug, Clone)]
pub struct GroupPriceInput {
    pub date: NaiveDate,
    pub adults: i32,
    pub child_ages: Vec<i32>,
    pub duration_nights: i32,
    pub room_type_id: Option<Uuid>,
    pub meal_plan: MealPlan,
    pub bed_type: Option<BedType>,
}

/// One child's line in the price breakdown.
#[derive(Debug, Clone, PartialEq)]
pub struct ChildPriceDetail {
    pub age: i32,
    pub position: i32,
    pub original_price: Decimal,
    pub discounted_price: Decimal,
    pub discount_type: Option<DiscountType>,
    pub discount_value: Option<Decimal>,
    pub rule_name: Option<String>,
    pub is_free: bool,
}

/// Structured calculation result. Every intermediate value is preserved so
/// agency staff can explain a quoted price to a customer.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupPriceResult {
    pub interval_id: Uuid,
    pub interval_name: Option<String>,
    pub interval_start: NaiveDate,
    pub interval_end: NaiveDate,
    pub room_type_id: Uuid,
    pub room_type_code: String,
    pub room_type_name: String,
    pub meal_plan: MealPlan,
    pub price_type: PriceType,
    pub duration_nights: i32,
    pub currency: String,
    pub adult_price_per_person: Decimal,
    pub adults_count: i32,
    pub adults_total: Decimal,
    pub children_count: i32,
    pub children_total: Decimal,
    pub children: Vec<ChildPriceDetail>,
    pub total: Decimal,
    pub per_person_avg: Decimal,
}

/// Calculate the total price for a group on an on-request package.
///
/// Orchestrates interval resolution, the base price lookup, duration
/// scaling, and per-child discount resolution. Any resolver failure aborts
/// the whole calculation.
pub fn calculate_group_price(
    input: &GroupPriceInput,
    snapshot: &PricingSnapshot,
) -> Result<GroupPriceResult, PricingError> {
    validate_input(input)?;

    let package = &snapshot.package;
    if !package.is_on_request() || !package.is_sellable() {
        return Err(PricingError::PackageNotEligible);
    }

    let total_persons = input.adults + input.child_ages.len() as i32;

    let room_type = match input.room_type_id {
        Some(id) => snapshot
            .room_types
            .iter()
            .find(|rt| rt.id == id)
            .ok_or_else(|| {
                PricingError::invalid_input(format!("room type {id} does not belong to package"))
            })?,
        None => select_room_type(&snapshot.room_types, total_persons)
            .ok_or(PricingError::PackageNotEligible)?,
    };

    let interval = resolve_interval(input.date, &snapshot.intervals)?;
    let base_price =
        lookup_base_price(interval, room_type.id, input.meal_plan, &snapshot.hotel_prices)?;

    let price_type = package.price_type();
    let scaled_price = match price_type {
        PriceType::PerPersonPerNight => base_price * Decimal::from(input.duration_nights),
        PriceType::PerPersonPerStay => base_price,
    };

    let adults_total = round_money(scaled_price * Decimal::from(input.adults), 2);

    let party = PartyContext {
        adults: input.adults,
        room_type_code: &room_type.code,
        bed_type: input.bed_type,
    };

    let mut children = Vec::with_capacity(input.child_ages.len());
    let mut children_total = Decimal::ZERO;

    for (index, &age) in input.child_ages.iter().enumerate() {
        let position = index as i32 + 1;
        let rule = resolve_child_rule(age, position, &party, &snapshot.policies);

        let detail = match rule {
            Some(rule) => {
                let discounted = round_money(child_price(rule, scaled_price), 2);
                ChildPriceDetail {
                    age,
                    position,
                    original_price: scaled_price,
                    discounted_price: discounted,
                    discount_type: rule.discount_type(),
                    discount_value: rule.discount_value,
                    rule_name: Some(rule.display_name()),
                    is_free: discounted.is_zero(),
                }
            }
            None => ChildPriceDetail {
                age,
                position,
                original_price: scaled_price,
                discounted_price: scaled_price,
                discount_type: None,
                discount_value: None,
                rule_name: None,
                is_free: false,
            },
        };

        children_total += detail.discounted_price;
        children.push(detail);
    }

    let total = round_money(adults_total + children_total, 2);
    let per_person_avg = round_money(total / Decimal::from(total_persons), 2);

    Ok(GroupPriceResult {
        interval_id: interval.id,
        interval_name: interval.name.clone(),
        interval_start: interval.start_date,
        interval_end: interval.end_date,
        room_type_id: room_type.id,
        room_type_code: room_type.code.clone(),
        room_type_name: room_type.name.clone(),
        meal_plan: input.meal_plan,
        price_type,
        duration_nights: input.duration_nights,
        currency: package.currency().to_string(),
        adult_price_per_person: scaled_price,
        adults_count: input.adults,
        adults_total,
        children_count: input.child_ages.len() as i32,
        children_total: round_money(children_total, 2),
        children,
        total,
        per_person_avg,
    })
}

fn validate_input(input: &GroupPriceInput) -> Result<(), PricingError> {
    if input.adults < 0 {
        return Err(PricingError::invalid_input("adults must not be negative"));
    }
    if input.adults == 0 && input.child_ages.is_empty() {
        return Err(PricingError::invalid_input("party must have at least one person"));
    }
    if input.duration_nights < 1 {
        return Err(PricingError::invalid_input("duration_nights must be at least 1"));
    }
    if let Some(&age) = input
        .child_ages
        .iter()
        .find(|&&age| age < 0 || age >= MAX_CHILD_AGE)
    {
        return Err(PricingError::invalid_input(format!(
            "child age {age} out of range 0-{}",
            MAX_CHILD_AGE - 1
        )));
    }
    Ok(())
}
