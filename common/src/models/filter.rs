//! Query-string filters for the `/filter` routes.
//!
//! Flag columns are stored as the literal strings `"true"` and `"false"`, so
//! filter values are compared as text and never coerced to booleans.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::{Validate, ValidationError};

use crate::errors::{AppError, AppResult};
use crate::utils::Predicate;

/// Message returned for any rejected filter value.
pub const INVALID_FILTER_MESSAGE: &str = "Invalid query parameter values";

/// Accepts exactly `"true"` or `"false"`. An empty value counts as absent.
fn validate_flag(value: &str) -> Result<(), ValidationError> {
    match value {
        "" | "true" | "false" => Ok(()),
        _ => {
            let mut err = ValidationError::new("flag");
            err.message = Some("expected \"true\" or \"false\"".into());
            Err(err)
        }
    }
}

/// Present, non-empty flag values.
fn flag(column: &'static str, value: &Option<String>) -> Option<Predicate> {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| Predicate::eq(column, v))
}

fn check(filter: &impl Validate) -> AppResult<()> {
    filter.validate().map_err(|errors| {
        tracing::debug!(%errors, "Rejected filter");
        AppError::Validation(INVALID_FILTER_MESSAGE.to_string())
    })
}

/// Filters accepted by `GET /restaurants/filter`.
#[derive(Debug, Default, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RestaurantFilter {
    /// `"true"` or `"false"`.
    #[validate(custom(function = "validate_flag"))]
    pub is_veg: Option<String>,
    /// `"true"` or `"false"`.
    #[validate(custom(function = "validate_flag"))]
    pub has_outdoor_seating: Option<String>,
    /// `"true"` or `"false"`.
    #[validate(custom(function = "validate_flag"))]
    pub is_luxury: Option<String>,
}

impl RestaurantFilter {
    /// Fails with a validation error if any present value is not a flag.
    pub fn check(&self) -> AppResult<()> {
        check(self)
    }

    /// Equality predicates for the present filters, in the order isVeg,
    /// hasOutdoorSeating, isLuxury.
    pub fn predicates(&self) -> Vec<Predicate> {
        [
            flag("isVeg", &self.is_veg),
            flag("hasOutdoorSeating", &self.has_outdoor_seating),
            flag("isLuxury", &self.is_luxury),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}

/// Filters accepted by `GET /dishes/filter`.
#[derive(Debug, Default, Clone, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct DishFilter {
    /// `"true"` or `"false"`.
    #[validate(custom(function = "validate_flag"))]
    pub is_veg: Option<String>,
}

impl DishFilter {
    pub fn check(&self) -> AppResult<()> {
        check(self)
    }

    pub fn predicates(&self) -> Vec<Predicate> {
        flag("isVeg", &self.is_veg).into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::BindValue;

    fn restaurant_filter(query: &str) -> RestaurantFilter {
        serde_json::from_value(serde_json::from_str(query).unwrap()).unwrap()
    }

    #[test]
    fn test_camel_case_names() {
        let filter = restaurant_filter(r#"{"isVeg":"true","hasOutdoorSeating":"false"}"#);
        assert_eq!(filter.is_veg.as_deref(), Some("true"));
        assert_eq!(filter.has_outdoor_seating.as_deref(), Some("false"));
        assert_eq!(filter.is_luxury, None);
    }

    #[test]
    fn test_rejects_non_flag_values() {
        let filter = RestaurantFilter {
            is_veg: Some("maybe".into()),
            ..Default::default()
        };
        match filter.check() {
            Err(AppError::Validation(msg)) => assert_eq!(msg, INVALID_FILTER_MESSAGE),
            other => panic!("unexpected result: {other:?}"),
        }

        let dish = DishFilter {
            is_veg: Some("TRUE".into()),
        };
        assert!(dish.check().is_err());
    }

    #[test]
    fn test_accepts_flags_and_absence() {
        assert!(RestaurantFilter::default().check().is_ok());
        let filter = RestaurantFilter {
            is_veg: Some("false".into()),
            has_outdoor_seating: Some("true".into()),
            is_luxury: Some(String::new()),
        };
        assert!(filter.check().is_ok());
    }

    #[test]
    fn test_predicates_follow_fixed_order() {
        let filter = RestaurantFilter {
            is_luxury: Some("true".into()),
            is_veg: Some("false".into()),
            has_outdoor_seating: None,
        };
        let predicates = filter.predicates();
        let columns: Vec<_> = predicates.iter().map(|p| p.column).collect();
        assert_eq!(columns, vec!["isVeg", "isLuxury"]);
        assert_eq!(predicates[0].value, BindValue::Text("false".into()));
    }

    #[test]
    fn test_empty_value_adds_no_predicate() {
        let filter = DishFilter {
            is_veg: Some(String::new()),
        };
        assert!(filter.predicates().is_empty());
        assert!(DishFilter::default().predicates().is_empty());
    }
}
