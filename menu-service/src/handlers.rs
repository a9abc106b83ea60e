//! Handler模块

use axum::{
    extract::{rejection::QueryRejection, Path, Query, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use common::errors::{AppError, AppResult};
use common::models::{
    DishDetailsResponse, DishFilter, DishFilterResponse, DishListResponse,
    RestaurantCatalogResponse, RestaurantDetailsResponse, RestaurantFilter,
    RestaurantFilterResponse, RestaurantListResponse, INVALID_FILTER_MESSAGE,
};
use common::response::ErrorResponse;
use crate::state::AppState;

pub const WELCOME_MESSAGE: &str = "Welcome to resturant Assignment API";

/// 欢迎信息
#[utoipa::path(
    get,
    path = "/",
    tag = "root",
    responses(
        (status = 200, description = "欢迎文本", body = String, content_type = "text/plain")
    )
)]
pub async fn welcome() -> &'static str {
    WELCOME_MESSAGE
}

/// 获取全部餐厅
#[utoipa::path(
    get,
    path = "/restaurants",
    tag = "restaurants",
    responses(
        (status = 200, description = "餐厅列表", body = RestaurantCatalogResponse),
        (status = 404, description = "没有餐厅", body = ErrorResponse),
        (status = 500, description = "数据库错误", body = ErrorResponse)
    )
)]
pub async fn list_restaurants(
    State(state): State<AppState>,
) -> AppResult<Json<RestaurantCatalogResponse>> {
    let restaurant = state.menu_service().all_restaurants().await?;
    Ok(Json(RestaurantCatalogResponse { restaurant }))
}

/// 根据 ID 获取餐厅详情
#[utoipa::path(
    get,
    path = "/restaurants/details/{id}",
    tag = "restaurants",
    params(
        ("id" = String, Path, description = "餐厅 ID（正整数）")
    ),
    responses(
        (status = 200, description = "餐厅详情，未找到时为空对象", body = RestaurantDetailsResponse),
        (status = 400, description = "ID 无效", body = ErrorResponse),
        (status = 500, description = "数据库错误", body = ErrorResponse)
    )
)]
pub async fn get_restaurant(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<RestaurantDetailsResponse>> {
    let restaurant = state.menu_service().restaurant_details(&id).await?;
    Ok(Json(RestaurantDetailsResponse { restaurant }))
}

/// 按菜系获取餐厅
#[utoipa::path(
    get,
    path = "/restaurants/cuisine/{cuisine}",
    tag = "restaurants",
    params(
        ("cuisine" = String, Path, description = "菜系名称")
    ),
    responses(
        (status = 200, description = "餐厅列表（可为空）", body = RestaurantListResponse),
        (status = 500, description = "数据库错误", body = ErrorResponse)
    )
)]
pub async fn restaurants_by_cuisine(
    State(state): State<AppState>,
    Path(cuisine): Path<String>,
) -> AppResult<Json<RestaurantListResponse>> {
    let restaurants = state.menu_service().restaurants_by_cuisine(&cuisine).await?;
    Ok(Json(restaurants.into()))
}

/// 按条件筛选餐厅
#[utoipa::path(
    get,
    path = "/restaurants/filter",
    tag = "restaurants",
    params(RestaurantFilter),
    responses(
        (status = 200, description = "筛选结果", body = RestaurantFilterResponse),
        (status = 400, description = "参数取值无效", body = ErrorResponse),
        (status = 404, description = "没有匹配的餐厅", body = ErrorResponse),
        (status = 500, description = "数据库错误", body = ErrorResponse)
    )
)]
pub async fn filter_restaurants(
    State(state): State<AppState>,
    filter: Result<Query<RestaurantFilter>, QueryRejection>,
) -> AppResult<Json<RestaurantFilterResponse>> {
    let Query(filter) = filter_or_reject(filter)?;
    let restaurants = state.menu_service().filter_restaurants(&filter).await?;
    Ok(Json(RestaurantFilterResponse {
        restaurants: restaurants.into(),
    }))
}

/// 按评分降序获取餐厅
#[utoipa::path(
    get,
    path = "/restaurants/sort-by-rating",
    tag = "restaurants",
    responses(
        (status = 200, description = "按评分排序的餐厅", body = RestaurantListResponse),
        (status = 500, description = "数据库错误", body = ErrorResponse)
    )
)]
pub async fn restaurants_by_rating(
    State(state): State<AppState>,
) -> AppResult<Json<RestaurantListResponse>> {
    let restaurants = state.menu_service().restaurants_by_rating().await?;
    Ok(Json(restaurants.into()))
}

/// 获取全部菜品
#[utoipa::path(
    get,
    path = "/dishes",
    tag = "dishes",
    responses(
        (status = 200, description = "菜品列表", body = DishListResponse),
        (status = 404, description = "没有菜品", body = ErrorResponse),
        (status = 500, description = "数据库错误", body = ErrorResponse)
    )
)]
pub async fn list_dishes(State(state): State<AppState>) -> AppResult<Json<DishListResponse>> {
    let dishes = state.menu_service().all_dishes().await?;
    Ok(Json(dishes.into()))
}

/// 根据 ID 获取菜品详情
#[utoipa::path(
    get,
    path = "/dishes/details/{id}",
    tag = "dishes",
    params(
        ("id" = String, Path, description = "菜品 ID（正整数）")
    ),
    responses(
        (status = 200, description = "菜品详情，未找到时为空对象", body = DishDetailsResponse),
        (status = 400, description = "ID 无效", body = ErrorResponse),
        (status = 500, description = "数据库错误", body = ErrorResponse)
    )
)]
pub async fn get_dish(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<DishDetailsResponse>> {
    let dish = state.menu_service().dish_details(&id).await?;
    Ok(Json(DishDetailsResponse { dish }))
}

/// 按条件筛选菜品
#[utoipa::path(
    get,
    path = "/dishes/filter",
    tag = "dishes",
    params(DishFilter),
    responses(
        (status = 200, description = "筛选结果", body = DishFilterResponse),
        (status = 400, description = "参数取值无效", body = ErrorResponse),
        (status = 404, description = "没有匹配的菜品", body = ErrorResponse),
        (status = 500, description = "数据库错误", body = ErrorResponse)
    )
)]
pub async fn filter_dishes(
    State(state): State<AppState>,
    filter: Result<Query<DishFilter>, QueryRejection>,
) -> AppResult<Json<DishFilterResponse>> {
    let Query(filter) = filter_or_reject(filter)?;
    let dishes = state.menu_service().filter_dishes(&filter).await?;
    Ok(Json(DishFilterResponse {
        dishes: dishes.into(),
    }))
}

/// 按价格降序获取菜品
#[utoipa::path(
    get,
    path = "/dishes/sort-by-price",
    tag = "dishes",
    responses(
        (status = 200, description = "按价格排序的菜品", body = DishListResponse),
        (status = 500, description = "数据库错误", body = ErrorResponse)
    )
)]
pub async fn dishes_by_price(State(state): State<AppState>) -> AppResult<Json<DishListResponse>> {
    let dishes = state.menu_service().dishes_by_price().await?;
    Ok(Json(dishes.into()))
}

/// 健康检查端点
#[utoipa::path(
    get,
    path = "/api/health",
    tag = "health",
    responses(
        (status = 200, description = "服务运行状态", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let database = if state.menu_service().database_reachable().await {
        "up"
    } else {
        "down"
    };

    Json(HealthResponse {
        status: "healthy".to_string(),
        service: state.config.service_name.clone(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
        database: database.to_string(),
    })
}

/// A query string that cannot be decoded (a repeated key, say) is reported
/// the same way as a bad flag value.
fn filter_or_reject<T>(filter: Result<Query<T>, QueryRejection>) -> AppResult<Query<T>> {
    filter.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Unreadable filter query");
        AppError::Validation(INVALID_FILTER_MESSAGE.to_string())
    })
}

/// 健康检查响应
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    /// 服务状态
    pub status: String,
    /// 服务名称
    pub service: String,
    /// 服务版本
    pub version: String,
    /// 当前时间戳
    pub timestamp: DateTime<Utc>,
    /// 数据库状态（up / down）
    pub database: String,
}
