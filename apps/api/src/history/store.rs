//! History persistence behind a trait, so the generation pipeline can be
//! exercised without a database.
//!
//! `AppState` holds an `Arc<dyn HistoryStore>`; production uses
//! `PgHistoryStore`.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::history::{HistoryRecord, NewHistoryRecord};

#[async_trait]
pub trait HistoryStore: Send + Sync {
    async fn insert(&self, record: NewHistoryRecord) -> Result<HistoryRecord, AppError>;

    /// Returns the record only if it belongs to `user_id`.
    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<HistoryRecord>, AppError>;

    /// Newest first, optionally filtered by agent slug.
    async fn list(
        &self,
        user_id: Uuid,
        agent: Option<&str>,
    ) -> Result<Vec<HistoryRecord>, AppError>;

    /// Returns `false` when nothing owned by `user_id` matched.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgHistoryStore {
    pool: PgPool,
}

impl PgHistoryStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HistoryStore for PgHistoryStore {
    async fn insert(&self, record: NewHistoryRecord) -> Result<HistoryRecord, AppError> {
        let row = sqlx::query_as::<_, HistoryRecord>(
            r#"
            INSERT INTO generation_history
                (id, user_id, agent, service, input_text, context, output_text)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(record.user_id)
        .bind(&record.agent)
        .bind(&record.service)
        .bind(&record.input_text)
        .bind(&record.context)
        .bind(&record.output_text)
        .fetch_one(&self.pool)
        .await?;

        info!(
            "Saved {} generation {} for user {}",
            row.agent, row.id, row.user_id
        );
        Ok(row)
    }

    async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Option<HistoryRecord>, AppError> {
        Ok(sqlx::query_as::<_, HistoryRecord>(
            "SELECT * FROM generation_history WHERE id = $1 AND user_id = $2",
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?)
    }

    async fn list(
        &self,
        user_id: Uuid,
        agent: Option<&str>,
    ) -> Result<Vec<HistoryRecord>, AppError> {
        Ok(sqlx::query_as::<_, HistoryRecord>(
            r#"
            SELECT * FROM generation_history
            WHERE user_id = $1 AND ($2::TEXT IS NULL OR agent = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(agent)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM generation_history WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

// ────────────────────────────────────────────────────────────────────────────
// In-memory double
// ────────────────────────────────────────────────────────────────────────────


#[cfg(test)]
mod tests {
    use super::memory::MemoryHistoryStore;
    use super::*;

    fn record(user_id: Uuid, agent: &str, output: &str) -> NewHistoryRecord {
        NewHistoryRecord {
            user_id,
            agent: agent.to_string(),
            service: "general".to_string(),
            input_text: "input".to_string(),
            context: serde_json::json!({}),
            output_text: output.to_string(),
        }
    }

    #[tokio::test]
    async fn test_saved_output_is_returned_byte_for_byte() {
        let store = MemoryHistoryStore::default();
        let user = Uuid::new_v4();
        let output = "  Line one\n---\nLine two with ünïcödé and trailing space ";
        let saved = store.insert(record(user, "career-coach", output)).await.unwrap();

        let fetched = store.get(user, saved.id).await.unwrap().unwrap();
        assert_eq!(fetched.output_text.as_bytes(), output.as_bytes());
    }

    #[tokio::test]
    async fn test_other_users_cannot_read_or_delete() {
        let store = MemoryHistoryStore::default();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let saved = store.insert(record(owner, "career-coach", "x")).await.unwrap();

        assert!(store.get(stranger, saved.id).await.unwrap().is_none());
        assert!(!store.delete(stranger, saved.id).await.unwrap());
        assert!(store.delete(owner, saved.id).await.unwrap());
        assert_eq!(store.len(), 0);
    }

    #[tokio::test]
    async fn test_list_filters_by_agent_newest_first() {
        let store = MemoryHistoryStore::default();
        let user = Uuid::new_v4();
        store.insert(record(user, "career-coach", "first")).await.unwrap();
        store.insert(record(user, "code-assistant", "second")).await.unwrap();
        store.insert(record(user, "career-coach", "third")).await.unwrap();

        let coach = store.list(user, Some("career-coach")).await.unwrap();
        assert_eq!(coach.len(), 2);
        assert_eq!(coach[0].output_text, "third");

        assert_eq!(store.list(user, None).await.unwrap().len(), 3);
    }
}
