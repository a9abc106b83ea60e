//! 路由模块

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::welcome))
        .route("/restaurants", get(handlers::list_restaurants))
        .route("/restaurants/details/{id}", get(handlers::get_restaurant))
        .route("/restaurants/cuisine/{cuisine}", get(handlers::restaurants_by_cuisine))
        .route("/restaurants/filter", get(handlers::filter_restaurants))
        .route("/restaurants/sort-by-rating", get(handlers::restaurants_by_rating))
        .route("/dishes", get(handlers::list_dishes))
        .route("/dishes/details/{id}", get(handlers::get_dish))
        .route("/dishes/filter", get(handlers::filter_dishes))
        .route("/dishes/sort-by-price", get(handlers::dishes_by_price))
        .route("/api/health", get(handlers::health_check))
}
