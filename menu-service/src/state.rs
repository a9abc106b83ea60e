//! Application state for the menu service.

use std::sync::Arc;

use common::config::AppConfig;

use crate::service::MenuService;
use crate::store::RecordStore;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub store: Arc<dyn RecordStore>,
}

impl AppState {
    /// Creates a new application state around an opened store.
    pub fn new(config: AppConfig, store: Arc<dyn RecordStore>) -> Self {
        Self { config, store }
    }

    /// Query service bound to this state's store.
    pub fn menu_service(&self) -> MenuService {
        MenuService::new(self.store.clone())
    }
}
