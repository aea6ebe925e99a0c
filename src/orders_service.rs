use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info};

use crate::models::{NewCompletedOrder, Order, SyncReport};
use crate::sheet_service::parser::{self, CompletedScan};
use crate::sheet_service::{SheetFetcher, SheetSource};
use crate::storage::CompletedOrderStorage;
use crate::Result;

#[derive(Clone)]
pub struct OrdersService {
    fetcher: Arc<dyn SheetFetcher>,
    storage: Arc<dyn CompletedOrderStorage>,
}

impl OrdersService {
    pub fn new(fetcher: Arc<dyn SheetFetcher>, storage: Arc<dyn CompletedOrderStorage>) -> Self {
        Self { fetcher, storage }
    }

    /// Заказы из таблицы. Готовые попутно сохраняются в архив, ошибки
    /// архива не мешают отдать список.
    pub async fn get_orders(&self, source: &SheetSource) -> Result<Vec<Order>> {
        let csv = self.fetcher.fetch_csv(source).await?;
        let parsed = parser::parse_orders(&csv);
        for record in &parsed.completed {
            match self.archive(record).await {
                Ok(true) => info!("Заказ {} добавлен в архив готовых", record.order_number),
                Ok(false) => debug!("Заказ {} уже в архиве", record.order_number),
                Err(e) => error!(
                    "Ошибка сохранения готового заказа {}: {e:?}",
                    record.order_number
                ),
            }
        }
        info!(
            "Из таблицы получено {} заказов, из них готовых {}",
            parsed.orders.len(),
            parsed.completed.len()
        );
        Ok(parsed.orders)
    }

    /// Переносит готовые заказы из таблицы в архив
    pub async fn sync_completed(&self, source: &SheetSource) -> Result<SyncReport> {
        let csv = self.fetcher.fetch_csv(source).await?;
        let found = match parser::parse_completed(&csv, Utc::now()) {
            CompletedScan::Empty => {
                info!("Таблица пустая, синхронизировать нечего");
                return Ok(SyncReport::no_data());
            }
            CompletedScan::Found(found) if found.is_empty() => {
                info!("Готовых заказов в таблице нет");
                return Ok(SyncReport::nothing_completed());
            }
            CompletedScan::Found(found) => found,
        };
        let mut saved = 0;
        for order in &found {
            if self.storage.exists(&order.order_number).await? {
                continue;
            }
            match self.storage.insert(order).await {
                Ok(true) => saved += 1,
                Ok(false) => debug!("Заказ {} уже сохранен", order.order_number),
                Err(e) => error!("Не удалось сохранить заказ {}: {e:?}", order.order_number),
            }
        }
        info!("Найдено готовых заказов: {}, сохранено новых: {saved}", found.len());
        Ok(SyncReport::done(found.len(), saved))
    }

    /// Сохраняет запись, только если заказа с таким номером еще нет.
    /// Возвращает true, если запись добавлена.
    pub async fn archive(&self, order: &NewCompletedOrder) -> Result<bool> {
        if self.storage.exists(&order.order_number).await? {
            return Ok(false);
        }
        self.storage.insert(order).await
    }
}
