//! Request DTOs for the pricing API endpoints.

use chrono::NaiveDate;
use serde::Deserialize;
use uuid::Uuid;

use super::calculators::{GroupPriceInput, PricingError};
use super::models::{BedType, MealPlan};

fn default_adults() -> i32 {
    2
}

fn default_duration_nights() -> i32 {
    7
}

/// Query parameters for the group price calculation endpoint
#[derive(Debug, Deserialize)]
pub struct CalculatePriceQuery {
    pub package_id: Uuid,
    #[serde(default = "default_adults")]
    pub adults: i32,
    /// Comma-separated child ages, e.g. "3,7,12"
    #[serde(default)]
    pub child_ages: Option<String>,
    pub date: NaiveDate,
    #[serde(default = "default_duration_nights")]
    pub duration_nights: i32,
    #[serde(default)]
    pub room_type_id: Option<Uuid>,
    #[serde(default)]
    pub meal_plan: Option<String>,
    #[serde(default)]
    pub bed_type: Option<String>,
}

impl CalculatePriceQuery {
    /// Validate and convert into the calculator input.
    pub fn into_input(self) -> Result<(Uuid, GroupPriceInput), PricingError> {
        let child_ages = parse_child_ages(self.child_ages.as_deref())?;
        let meal_plan = parse_meal_plan(self.meal_plan.as_deref())?;
        let bed_type = parse_bed_type(self.bed_type.as_deref())?;

        Ok((
            self.package_id,
            GroupPriceInput {
                date: self.date,
                adults: self.adults,
                child_ages,
                duration_nights: self.duration_nights,
                room_type_id: self.room_type_id,
                meal_plan,
                bed_type,
            },
        ))
    }
}

/// Query parameters for the per-date price lookup endpoint
#[derive(Debug, Deserialize)]
pub struct PriceForDateQuery {
    pub date: NaiveDate,
    pub room_type_id: Uuid,
    #[serde(default)]
    pub meal_plan: Option<String>,
}

impl PriceForDateQuery {
    pub fn meal_plan(&self) -> Result<MealPlan, PricingError> {
        parse_meal_plan(self.meal_plan.as_deref())
    }
}

/// JSON body for the batch calculation endpoint
#[derive(Debug, Deserialize)]
pub struct BatchCalculateRequest {
    pub package_ids: Vec<Uuid>,
    #[serde(default = "default_adults")]
    pub adults: i32,
    #[serde(default)]
    pub child_ages: Vec<i32>,
    pub date: NaiveDate,
    #[serde(default = "default_duration_nights")]
    pub duration_nights: i32,
    #[serde(default)]
    pub meal_plan: Option<String>,
}

impl BatchCalculateRequest {
    pub fn into_input(self) -> Result<(Vec<Uuid>, GroupPriceInput), PricingError> {
        let meal_plan = parse_meal_plan(self.meal_plan.as_deref())?;
        Ok((
            self.package_ids,
            GroupPriceInput {
                date: self.date,
                adults: self.adults,
                child_ages: self.child_ages,
                duration_nights: self.duration_nights,
                // Batch quotes are room-agnostic: the best-fitting room is
                // selected per package.
                room_type_id: None,
                meal_plan,
                bed_type: None,
            },
        ))
    }
}

/// The admin quoting UI defaults to bed & breakfast when no plan is picked.
fn parse_meal_plan(code: Option<&str>) -> Result<MealPlan, PricingError> {
    match code {
        None => Ok(MealPlan::BedBreakfast),
        Some(code) => MealPlan::parse(code).ok_or_else(|| {
            PricingError::invalid_input(format!(
                "unknown meal plan '{code}', expected one of ND, BB, HB, FB, AI"
            ))
        }),
    }
}

fn parse_bed_type(code: Option<&str>) -> Result<Option<BedType>, PricingError> {
    match code {
        None => Ok(None),
        Some(code) => BedType::parse(code).map(Some).ok_or_else(|| {
            PricingError::invalid_input(format!(
                "unknown bed type '{code}', expected one of any, separate, shared"
            ))
        }),
    }
}

fn parse_child_ages(raw: Option<&str>) -> Result<Vec<i32>, PricingError> {
    let Some(raw) = raw else {
        return Ok(Vec::new());
    };

    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i32>()
                .map_err(|_| PricingError::invalid_input(format!("malformed child age '{s}'")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_child_ages() {
        assert_eq!(parse_child_ages(None).unwrap(), Vec::<i32>::new());
        assert_eq!(parse_child_ages(Some("")).unwrap(), Vec::<i32>::new());
        assert_eq!(parse_child_ages(Some("3,7,12")).unwrap(), vec![3, 7, 12]);
        assert_eq!(parse_child_ages(Some(" 3 , 7 ")).unwrap(), vec![3, 7]);
        assert!(parse_child_ages(Some("3,abc")).is_err());
    }

    #[test]
    fn test_parse_bed_type_codes() {
        assert_eq!(parse_bed_type(None).unwrap(), None);
        assert_eq!(parse_bed_type(Some("shared")).unwrap(), Some(BedType::Shared));
        assert_eq!(parse_bed_type(Some("Separate")).unwrap(), Some(BedType::Separate));
        // A bogus bed type is rejected up front, not silently priced at
        // full rate by matching no bed-conditioned rule.
        assert!(matches!(
            parse_bed_type(Some("queen")),
            Err(PricingError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_parse_meal_plan_codes() {
        assert_eq!(parse_meal_plan(None).unwrap(), MealPlan::BedBreakfast);
        assert_eq!(parse_meal_plan(Some("ai")).unwrap(), MealPlan::AllInclusive);
        assert_eq!(parse_meal_plan(Some("HB")).unwrap(), MealPlan::HalfBoard);
        assert!(matches!(
            parse_meal_plan(Some("XX")),
            Err(PricingError::InvalidInput { .. })
        ));
    }
}
