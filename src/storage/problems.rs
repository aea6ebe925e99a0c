use chrono::Utc;

use crate::models::{NewProblem, ProblemEntry};
use crate::Result;

use super::{ProblemStorage, Storage};

#[async_trait::async_trait]
impl ProblemStorage for Storage {
    async fn insert(&self, problem: NewProblem) -> Result<ProblemEntry> {
        let entry = ProblemEntry::from_new(problem);
        let query = "INSERT INTO problems(id, order_number, manager, description, reported_by, created_at) \
                     VALUES ($1, $2, $3, $4, $5, $6)";
        sqlx::query(query)
            .bind(entry.id)
            .bind(&entry.order_number)
            .bind(&entry.manager)
            .bind(&entry.description)
            .bind(&entry.reported_by)
            .bind(entry.created_at)
            .execute(&self.pool)
            .await?;
        Ok(entry)
    }
    async fn get_open(&self) -> Result<Vec<ProblemEntry>> {
        let query = "SELECT * FROM problems WHERE resolved IS NULL OR resolved = false \
                     ORDER BY created_at DESC";
        let result = sqlx::query_as::<_, ProblemEntry>(query)
            .fetch_all(&self.pool)
            .await?;
        Ok(result)
    }
    async fn get_resolved(&self) -> Result<Vec<ProblemEntry>> {
        let query = "SELECT * FROM problems WHERE resolved = true ORDER BY resolved_at DESC";
        let result = sqlx::query_as::<_, ProblemEntry>(query)
            .fetch_all(&self.pool)
            .await?;
        Ok(result)
    }
    async fn resolve(&self, id: uuid::Uuid, resolved_by: &str) -> Result<Option<ProblemEntry>> {
        let query = "UPDATE problems SET resolved = true, resolved_at = $2, resolved_by = $3 \
                     WHERE id = $1 RETURNING *";
        let result = sqlx::query_as::<_, ProblemEntry>(query)
            .bind(id)
            .bind(Utc::now())
            .bind(resolved_by)
            .fetch_optional(&self.pool)
            .await?;
        Ok(result)
    }
}
