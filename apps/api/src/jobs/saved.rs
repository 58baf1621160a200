//! Saved job postings, one list per user.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::saved_job::{NewSavedJob, SavedJob};

#[async_trait]
pub trait SavedJobStore: Send + Sync {
    async fn save(&self, job: NewSavedJob) -> Result<SavedJob, AppError>;

    /// Most recently saved first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<SavedJob>, AppError>;

    /// Returns `false` when nothing owned by `user_id` matched.
    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

pub struct PgSavedJobStore {
    pool: PgPool,
}

impl PgSavedJobStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl SavedJobStore for PgSavedJobStore {
    async fn save(&self, job: NewSavedJob) -> Result<SavedJob, AppError> {
        let row = sqlx::query_as::<_, SavedJob>(
            r#"
            INSERT INTO saved_jobs
                (id, user_id, title, company, location, url, platform, match_percentage, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(job.user_id)
        .bind(&job.title)
        .bind(&job.company)
        .bind(&job.location)
        .bind(&job.url)
        .bind(&job.platform)
        .bind(i32::from(job.match_percentage))
        .bind(&job.notes)
        .fetch_one(&self.pool)
        .await?;

        info!("Saved job {} for user {}", row.id, row.user_id);
        Ok(row)
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<SavedJob>, AppError> {
        Ok(sqlx::query_as::<_, SavedJob>(
            "SELECT * FROM saved_jobs WHERE user_id = $1 ORDER BY saved_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM saved_jobs WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    pub struct MemorySavedJobStore {
        rows: Mutex<Vec<SavedJob>>,
    }

    #[async_trait]
    impl SavedJobStore for MemorySavedJobStore {
        async fn save(&self, job: NewSavedJob) -> Result<SavedJob, AppError> {
            let row = SavedJob {
                id: Uuid::new_v4(),
                user_id: job.user_id,
                title: job.title,
                company: job.company,
                location: job.location,
                url: job.url,
                platform: job.platform,
                match_percentage: i32::from(job.match_percentage),
                notes: job.notes,
                saved_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }

        async fn list(&self, user_id: Uuid) -> Result<Vec<SavedJob>, AppError> {
            Ok(self
                .rows
                .lock()
                .unwrap()
                .iter()
                .rev()
                .filter(|r| r.user_id == user_id)
                .cloned()
                .collect())
        }

        async fn delete(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| !(r.id == id && r.user_id == user_id));
            Ok(rows.len() < before)
        }
    }
}
