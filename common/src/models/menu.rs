//! Restaurant and dish response envelopes.
//!
//! Rows are passed through as JSON objects keyed by column name, in table
//! column order, so whatever columns the externally owned schema defines are
//! returned unchanged.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One table row: column name to value.
pub type Record = serde_json::Map<String, serde_json::Value>;

/// `GET /restaurants`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestaurantCatalogResponse {
    #[schema(value_type = Vec<Object>)]
    pub restaurant: Vec<Record>,
}

/// `GET /restaurants/cuisine/{cuisine}` and `GET /restaurants/sort-by-rating`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestaurantListResponse {
    #[schema(value_type = Vec<Object>)]
    pub restaurants: Vec<Record>,
}

/// `GET /restaurants/details/{id}`.
///
/// A missing row leaves the field out entirely, so the body is `{}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestaurantDetailsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub restaurant: Option<Record>,
}

/// `GET /restaurants/filter`. The list is nested one level deeper than the
/// other listing routes.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RestaurantFilterResponse {
    pub restaurants: RestaurantListResponse,
}

/// `GET /dishes` and `GET /dishes/sort-by-price`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DishListResponse {
    #[schema(value_type = Vec<Object>)]
    pub dishes: Vec<Record>,
}

/// `GET /dishes/details/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DishDetailsResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(value_type = Option<Object>)]
    pub dish: Option<Record>,
}

/// `GET /dishes/filter`, nested like [`RestaurantFilterResponse`].
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DishFilterResponse {
    pub dishes: DishListResponse,
}

impl From<Vec<Record>> for RestaurantListResponse {
    fn from(restaurants: Vec<Record>) -> Self {
        Self { restaurants }
    }
}

impl From<Vec<Record>> for DishListResponse {
    fn from(dishes: Vec<Record>) -> Self {
        Self { dishes }
    }
}
