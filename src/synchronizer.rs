use std::sync::Arc;

use crate::{orders_service::OrdersService, sheet_service::SheetSource, utils::pause_minutes};

/// Периодически переносит готовые заказы из таблицы в архив
pub struct Synchronizer {
    orders_service: OrdersService,
    source: SheetSource,
    interval_minutes: u64,
}
impl Synchronizer {
    pub fn new(orders_service: OrdersService, source: SheetSource, interval_minutes: u64) -> Arc<Self> {
        Arc::new(Self {
            orders_service,
            source,
            interval_minutes,
        })
    }
    pub async fn run(self: Arc<Self>) {
        if self.interval_minutes == 0 {
            tracing::info!("Фоновая синхронизация готовых заказов отключена");
            return;
        }
        loop {
            self.sync_once().await;
            tracing::info!(
                "Следующая синхронизация готовых заказов через {} мин",
                self.interval_minutes
            );
            pause_minutes(self.interval_minutes).await;
        }
    }
    async fn sync_once(&self) {
        tracing::info!("Начинаю синхронизацию готовых заказов");
        match self.orders_service.sync_completed(&self.source).await {
            Ok(report) => tracing::info!(
                "{}: найдено {}, сохранено {}",
                report.message,
                report.found.unwrap_or_default(),
                report.saved
            ),
            Err(e) => tracing::error!("Ошибка синхронизации готовых заказов: {e:?}"),
        }
    }
}
