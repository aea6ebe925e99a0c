use crate::models::{CompletedOrder, NewCompletedOrder};
use crate::Result;

use super::{CompletedOrderStorage, Storage};

#[async_trait::async_trait]
impl CompletedOrderStorage for Storage {
    async fn exists(&self, order_number: &str) -> Result<bool> {
        let query = "SELECT id FROM completed_orders WHERE order_number = $1 LIMIT 1";
        let found = sqlx::query_scalar::<_, uuid::Uuid>(query)
            .bind(order_number)
            .fetch_optional(&self.pool)
            .await?;
        Ok(found.is_some())
    }
    async fn insert(&self, order: &NewCompletedOrder) -> Result<bool> {
        let query = "INSERT INTO completed_orders(id, order_number, manager, laser_time, cleaning_time, \
                     bending_time, welding_time, painting_time, warehouse75_time, warehouse_time, \
                     total_time, completed_at) \
                     VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12) \
                     ON CONFLICT (order_number) DO NOTHING";
        let result = sqlx::query(query)
            .bind(uuid::Uuid::new_v4())
            .bind(&order.order_number)
            .bind(&order.manager)
            .bind(order.laser_time)
            .bind(order.cleaning_time)
            .bind(order.bending_time)
            .bind(order.welding_time)
            .bind(order.painting_time)
            .bind(order.warehouse75_time)
            .bind(order.warehouse_time)
            .bind(order.total_time)
            .bind(order.completed_at)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
    async fn get_all(&self) -> Result<Vec<CompletedOrder>> {
        let query = "SELECT * FROM completed_orders ORDER BY completed_at DESC";
        let result = sqlx::query_as::<_, CompletedOrder>(query)
            .fetch_all(&self.pool)
            .await?;
        Ok(result)
    }
    async fn clear(&self) -> Result<u64> {
        let query = "DELETE FROM completed_orders";
        let result = sqlx::query(query).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }
}
