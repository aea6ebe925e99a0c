mod analytics;
pub mod config;
mod error;
mod models;
mod orders_service;
mod routes;
mod sheet_service;
mod storage;
mod synchronizer;
pub mod utils;

use std::sync::Arc;

pub use error::{AppError, Result};

use config::Config;
use models::AppState;
use orders_service::OrdersService;
use sheet_service::HttpSheetFetcher;
use storage::Storage;

pub struct LocalService {
    pool: sqlx::PgPool,
    config: Config,
}
impl LocalService {
    pub fn new(pool: sqlx::PgPool, config: Config) -> Self {
        Self { pool, config }
    }
    /// Применяет миграции, запускает фоновую синхронизацию и собирает роутер
    pub async fn start(self) -> Result<axum::Router> {
        tracing::info!("Инициализирую базу данных");
        let storage = Arc::new(Storage::new(self.pool));
        storage.migrate().await?;
        tracing::info!("База данных готова к использованию");

        let fetcher = Arc::new(HttpSheetFetcher::new()?);
        let orders_service = OrdersService::new(fetcher, storage.clone());

        tracing::info!(
            "Источник заказов: таблица {}, лист {}",
            self.config.sheet.spreadsheet_id,
            self.config.sheet.sheet_gid
        );
        let syncer = synchronizer::Synchronizer::new(
            orders_service.clone(),
            self.config.sheet.clone(),
            self.config.sync_interval_minutes,
        );
        tokio::spawn(syncer.run());

        let state = AppState::new(
            Arc::new(self.config),
            orders_service,
            storage.clone(),
            storage.clone(),
            storage,
        );
        Ok(routes::init(state))
    }
}
