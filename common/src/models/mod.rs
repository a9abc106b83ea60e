//! Shared data models.

pub mod filter;
pub mod menu;

pub use filter::{DishFilter, RestaurantFilter, INVALID_FILTER_MESSAGE};
pub use menu::{
    DishDetailsResponse, DishFilterResponse, DishListResponse, Record,
    RestaurantCatalogResponse, RestaurantDetailsResponse, RestaurantFilterResponse,
    RestaurantListResponse,
};
