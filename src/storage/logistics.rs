use crate::models::{LogisticsEntry, NewLogisticsEntry};
use crate::Result;

use super::{LogisticsStorage, Storage};

#[async_trait::async_trait]
impl LogisticsStorage for Storage {
    async fn insert(&self, entry: NewLogisticsEntry) -> Result<LogisticsEntry> {
        let entry = LogisticsEntry::from_new(entry);
        let query = "INSERT INTO logistics(id, order_number, manager, moved_to, moved_by, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6)";
        sqlx::query(query)
            .bind(entry.id)
            .bind(&entry.order_number)
            .bind(&entry.manager)
            .bind(&entry.moved_to)
            .bind(&entry.moved_by)
            .bind(entry.created_at)
            .execute(&self.pool)
            .await?;
        Ok(entry)
    }
    async fn get_all(&self) -> Result<Vec<LogisticsEntry>> {
        let query = "SELECT * FROM logistics ORDER BY created_at DESC";
        let result = sqlx::query_as::<_, LogisticsEntry>(query)
            .fetch_all(&self.pool)
            .await?;
        Ok(result)
    }
}
