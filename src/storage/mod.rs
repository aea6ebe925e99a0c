mod completed;
mod logistics;
#[cfg(test)]
pub mod memory;
mod problems;

use crate::{
    models::{
        CompletedOrder, LogisticsEntry, NewCompletedOrder, NewLogisticsEntry, NewProblem,
        ProblemEntry,
    },
    Result,
};

#[async_trait::async_trait]
pub trait CompletedOrderStorage: Send + Sync {
    async fn exists(&self, order_number: &str) -> Result<bool>;
    /// false, если заказ с таким номером уже есть
    async fn insert(&self, order: &NewCompletedOrder) -> Result<bool>;
    async fn get_all(&self) -> Result<Vec<CompletedOrder>>;
    async fn clear(&self) -> Result<u64>;
}

#[async_trait::async_trait]
pub trait LogisticsStorage: Send + Sync {
    async fn insert(&self, entry: NewLogisticsEntry) -> Result<LogisticsEntry>;
    async fn get_all(&self) -> Result<Vec<LogisticsEntry>>;
}

#[async_trait::async_trait]
pub trait ProblemStorage: Send + Sync {
    async fn insert(&self, problem: NewProblem) -> Result<ProblemEntry>;
    async fn get_open(&self) -> Result<Vec<ProblemEntry>>;
    async fn get_resolved(&self) -> Result<Vec<ProblemEntry>>;
    async fn resolve(&self, id: uuid::Uuid, resolved_by: &str) -> Result<Option<ProblemEntry>>;
}

#[derive(Clone)]
pub struct Storage {
    pool: sqlx::PgPool,
}
impl Storage {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
    pub async fn migrate(&self) -> Result<()> {
        sqlx::migrate!().run(&self.pool).await?;
        tracing::info!("Миграции базы данных применены");
        Ok(())
    }
}
