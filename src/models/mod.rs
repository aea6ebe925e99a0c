mod completed;
mod logistics;
mod order;
mod problem;
pub use completed::*;
pub use logistics::*;
pub use order::*;
pub use problem::*;

use std::sync::Arc;

use crate::config::Config;
use crate::orders_service::OrdersService;
use crate::storage::{CompletedOrderStorage, LogisticsStorage, ProblemStorage};

/// Общие данные для обработчиков
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub orders_service: OrdersService,
    pub completed_storage: Arc<dyn CompletedOrderStorage>,
    pub logistics_storage: Arc<dyn LogisticsStorage>,
    pub problem_storage: Arc<dyn ProblemStorage>,
}
impl AppState {
    /// Создать новый экземпляр общих данных
    pub fn new(
        config: Arc<Config>,
        orders_service: OrdersService,
        completed_storage: Arc<dyn CompletedOrderStorage>,
        logistics_storage: Arc<dyn LogisticsStorage>,
        problem_storage: Arc<dyn ProblemStorage>,
    ) -> Self {
        Self {
            config,
            orders_service,
            completed_storage,
            logistics_storage,
            problem_storage,
        }
    }
}
