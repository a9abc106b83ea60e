//! 餐厅与菜品查询服务
//!
//! 提供餐厅与菜品的只读查询功能，包括：
//! - 列表、详情与按菜系查询
//! - 按标志位筛选
//! - 按评分 / 价格排序

mod handlers;
mod routes;
mod service;
mod state;
mod store;
#[cfg(test)]
mod test_support;

use std::sync::Arc;

use anyhow::Context;
use axum::{middleware, routing::get, Json, Router};
use common::config::{AppConfig, LogFormat};
use common::middleware::request_id::request_id_middleware;
use state::AppState;
use store::SqliteStore;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use utoipa::OpenApi;

const SERVICE_NAME: &str = "menu-service";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "餐厅菜品查询服务 API",
        version = "0.1.0",
        description = "餐厅与菜品只读查询微服务"
    ),
    paths(
        handlers::welcome,
        handlers::list_restaurants,
        handlers::get_restaurant,
        handlers::restaurants_by_cuisine,
        handlers::filter_restaurants,
        handlers::restaurants_by_rating,
        handlers::list_dishes,
        handlers::get_dish,
        handlers::filter_dishes,
        handlers::dishes_by_price,
        handlers::health_check,
    ),
    components(schemas(
        common::models::RestaurantCatalogResponse,
        common::models::RestaurantListResponse,
        common::models::RestaurantDetailsResponse,
        common::models::RestaurantFilterResponse,
        common::models::DishListResponse,
        common::models::DishDetailsResponse,
        common::models::DishFilterResponse,
        common::response::ErrorResponse,
        handlers::HealthResponse,
    )),
    tags(
        (name = "root", description = "欢迎端点"),
        (name = "restaurants", description = "餐厅查询端点"),
        (name = "dishes", description = "菜品查询端点"),
        (name = "health", description = "健康检查端点")
    )
)]
struct ApiDoc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 加载配置
    let config = AppConfig::load_with_service(SERVICE_NAME);

    // 初始化日志追踪
    init_tracing(config.log_format);

    // 打开数据库（在开始监听之前）
    let store = SqliteStore::connect(&config)
        .await
        .with_context(|| format!("无法打开数据库 {}", config.database_url))?;

    // 创建应用状态
    let state = AppState::new(config.clone(), Arc::new(store));

    // 创建路由
    let app = create_router(state);

    // 启动服务
    let addr = config.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("绑定地址失败: {addr}"))?;
    info!(
        service = SERVICE_NAME,
        address = %addr,
        database = %config.database_url,
        "启动服务"
    );

    axum::serve(listener, app).await.context("服务运行失败")?;
    Ok(())
}

fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(routes::router())
        .route("/api-docs/openapi.json", get(openapi_json))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
