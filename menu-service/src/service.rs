//! 餐厅与菜品查询服务模块
//!
//! One method per route. Each builds a [`SelectQuery`], runs it against the
//! injected [`RecordStore`] and applies the route's empty-result rule.

use std::sync::Arc;

use common::errors::{AppError, AppResult};
use common::models::{DishFilter, Record, RestaurantFilter};
use common::utils::{parse_positive_id, PositiveId, SelectQuery, Table};

use crate::store::RecordStore;

pub const NO_RESTAURANT_MESSAGE: &str = "No resutarant found!";
pub const NO_DISH_MESSAGE: &str = "No Dish found!";
pub const NO_FILTERED_DISHES_MESSAGE: &str = "No dishes found!";
pub const INVALID_RESTAURANT_ID_MESSAGE: &str = "Invalid restaurant ID";
pub const INVALID_DISH_ID_MESSAGE: &str = "Invalid Dish ID";

/// 餐厅与菜品查询服务
pub struct MenuService {
    store: Arc<dyn RecordStore>,
}

impl MenuService {
    /// 创建新的查询服务实例
    pub fn new(store: Arc<dyn RecordStore>) -> Self {
        Self { store }
    }

    /// All restaurants. Fails with not-found when the table is empty.
    pub async fn all_restaurants(&self) -> AppResult<Vec<Record>> {
        let rows = self
            .store
            .fetch_all(&SelectQuery::all(Table::Restaurants))
            .await?;
        non_empty(rows, NO_RESTAURANT_MESSAGE)
    }

    /// The restaurant with id `raw_id`. A valid id with no row is `Ok(None)`.
    pub async fn restaurant_details(&self, raw_id: &str) -> AppResult<Option<Record>> {
        self.find_by_id(Table::Restaurants, raw_id, INVALID_RESTAURANT_ID_MESSAGE).await
    }

    /// Restaurants serving `cuisine`. An empty list is a valid answer.
    pub async fn restaurants_by_cuisine(&self, cuisine: &str) -> AppResult<Vec<Record>> {
        self.store
            .fetch_all(&SelectQuery::where_eq(
                Table::Restaurants,
                "cuisine",
                cuisine,
            ))
            .await
    }

    /// Restaurants matching every present flag in `filter`.
    pub async fn filter_restaurants(&self, filter: &RestaurantFilter) -> AppResult<Vec<Record>> {
        filter.check()?;
        let query = SelectQuery::filtered(Table::Restaurants, filter.predicates());
        let rows = self.store.fetch_all(&query).await?;
        non_empty(rows, NO_RESTAURANT_MESSAGE)
    }

    /// All restaurants, highest rating first.
    pub async fn restaurants_by_rating(&self) -> AppResult<Vec<Record>> {
        self.store
            .fetch_all(&SelectQuery::all(Table::Restaurants).order_by_desc("rating"))
            .await
    }

    /// All dishes. Fails with not-found when the table is empty.
    pub async fn all_dishes(&self) -> AppResult<Vec<Record>> {
        let rows = self.store.fetch_all(&SelectQuery::all(Table::Dishes)).await?;
        non_empty(rows, NO_DISH_MESSAGE)
    }

    /// The dish with id `raw_id`. A valid id with no row is `Ok(None)`.
    pub async fn dish_details(&self, raw_id: &str) -> AppResult<Option<Record>> {
        self.find_by_id(Table::Dishes, raw_id, INVALID_DISH_ID_MESSAGE).await
    }

    /// Dishes matching `filter`.
    pub async fn filter_dishes(&self, filter: &DishFilter) -> AppResult<Vec<Record>> {
        filter.check()?;
        let query = SelectQuery::filtered(Table::Dishes, filter.predicates());
        let rows = self.store.fetch_all(&query).await?;
        non_empty(rows, NO_FILTERED_DISHES_MESSAGE)
    }

    /// All dishes, most expensive first.
    pub async fn dishes_by_price(&self) -> AppResult<Vec<Record>> {
        self.store
            .fetch_all(&SelectQuery::all(Table::Dishes).order_by_desc("price"))
            .await
    }

    /// Looks up one row by a raw path id. An id too large for any stored key
    /// matches nothing and skips the database.
    async fn find_by_id(
        &self,
        table: Table,
        raw_id: &str,
        message: &str,
    ) -> AppResult<Option<Record>> {
        match parse_positive_id(raw_id) {
            Some(PositiveId::Value(id)) => {
                self.store
                    .fetch_optional(&SelectQuery::by_id(table, id))
                    .await
            }
            Some(PositiveId::OutOfRange) => Ok(None),
            None => Err(AppError::Validation(message.to_string())),
        }
    }

    /// Whether the database answers a trivial query.
    pub async fn database_reachable(&self) -> bool {
        match self.store.ping().await {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(error = %e, "Database ping failed");
                false
            }
        }
    }
}

fn non_empty(rows: Vec<Record>, message: &str) -> AppResult<Vec<Record>> {
    if rows.is_empty() {
        Err(AppError::NotFound(message.to_string()))
    } else {
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::SqliteStore;
    use crate::test_support::{empty_pool, fixture_pool};
    use serde_json::Value;

    async fn service() -> MenuService {
        MenuService::new(Arc::new(SqliteStore::from_pool(fixture_pool().await)))
    }

    async fn empty_service() -> MenuService {
        MenuService::new(Arc::new(SqliteStore::from_pool(empty_pool().await)))
    }

    fn numbers(rows: &[Record], field: &str) -> Vec<f64> {
        rows.iter()
            .map(|r| r[field].as_f64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_all_restaurants() {
        let rows = service().await.all_restaurants().await.unwrap();
        assert_eq!(rows.len(), 4);
    }

    #[tokio::test]
    async fn test_empty_tables_are_not_found() {
        let service = empty_service().await;

        match service.all_restaurants().await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "No resutarant found!"),
            other => panic!("unexpected result: {other:?}"),
        }
        match service.all_dishes().await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "No Dish found!"),
            other => panic!("unexpected result: {other:?}"),
        }
        match service.filter_dishes(&DishFilter::default()).await {
            Err(AppError::NotFound(msg)) => assert_eq!(msg, "No dishes found!"),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_details_for_missing_id_is_none() {
        let service = service().await;
        assert!(service.restaurant_details("404").await.unwrap().is_none());
        assert!(service.dish_details("404").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_details_accept_hex_and_oversized_ids() {
        let service = service().await;
        let dish = service.dish_details("0x2").await.unwrap().unwrap();
        assert_eq!(dish["name"], Value::from("Chicken Tikka"));
        assert!(service
            .restaurant_details("99999999999999999999")
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn test_details_rejects_bad_ids() {
        let service = service().await;
        for raw in ["abc", "-1", "0"] {
            match service.restaurant_details(raw).await {
                Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid restaurant ID"),
                other => panic!("{raw}: unexpected result: {other:?}"),
            }
            match service.dish_details(raw).await {
                Err(AppError::Validation(msg)) => assert_eq!(msg, "Invalid Dish ID"),
                other => panic!("{raw}: unexpected result: {other:?}"),
            }
        }
    }

    #[tokio::test]
    async fn test_cuisine_may_be_empty() {
        let service = service().await;
        assert_eq!(service.restaurants_by_cuisine("Indian").await.unwrap().len(), 2);
        assert!(service.restaurants_by_cuisine("Mexican").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_unfiltered_filter_matches_all() {
        let service = service().await;
        let all = service.all_restaurants().await.unwrap();
        let filtered = service
            .filter_restaurants(&RestaurantFilter::default())
            .await
            .unwrap();
        assert_eq!(all, filtered);
    }

    #[tokio::test]
    async fn test_filter_combines_flags() {
        let filter = RestaurantFilter {
            is_veg: Some("false".into()),
            is_luxury: Some("true".into()),
            has_outdoor_seating: Some("true".into()),
        };
        let rows = service().await.filter_restaurants(&filter).await.unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["name"], Value::from("Sushi Bay"));
    }

    #[tokio::test]
    async fn test_filter_with_no_match_is_not_found() {
        let filter = RestaurantFilter {
            is_veg: Some("true".into()),
            is_luxury: Some("true".into()),
            ..Default::default()
        };
        let err = service().await.filter_restaurants(&filter).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_sorted_by_rating_is_non_increasing() {
        let rows = service().await.restaurants_by_rating().await.unwrap();
        let ratings = numbers(&rows, "rating");
        assert!(ratings.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_sorted_by_price_is_non_increasing() {
        let rows = service().await.dishes_by_price().await.unwrap();
        let prices = numbers(&rows, "price");
        assert_eq!(prices.len(), 4);
        assert!(prices.windows(2).all(|w| w[0] >= w[1]));
    }

    #[tokio::test]
    async fn test_veg_dishes() {
        let filter = DishFilter {
            is_veg: Some("true".into()),
        };
        let rows = service().await.filter_dishes(&filter).await.unwrap();
        assert!(rows.iter().all(|r| r["isVeg"] == "true"));
        assert_eq!(rows.len(), 2);
    }
}
