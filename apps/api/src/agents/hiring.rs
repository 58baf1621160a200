//! Hired agents: a per-user shortlist, at most one row per (user, agent).

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::agents::catalog::AgentKind;
use crate::errors::AppError;
use crate::models::hired_agent::HiredAgent;

/// Result of a hire request. Hiring twice yields the original row.
#[derive(Debug, Clone, PartialEq)]
pub enum Hire {
    Created(HiredAgent),
    Existing(HiredAgent),
}

#[async_trait]
pub trait HiredAgentStore: Send + Sync {
    async fn hire(&self, user_id: Uuid, agent: AgentKind) -> Result<Hire, AppError>;

    /// Newest first.
    async fn list(&self, user_id: Uuid) -> Result<Vec<HiredAgent>, AppError>;

    /// Returns `false` when nothing owned by `user_id` matched.
    async fn release(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError>;
}

// ────────────────────────────────────────────────────────────────────────────
// PostgreSQL
// ────────────────────────────────────────────────────────────────────────────

pub struct PgHiredAgentStore {
    pool: PgPool,
}

impl PgHiredAgentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl HiredAgentStore for PgHiredAgentStore {
    async fn hire(&self, user_id: Uuid, agent: AgentKind) -> Result<Hire, AppError> {
        let inserted: Option<HiredAgent> = sqlx::query_as(
            r#"
            INSERT INTO hired_agents (user_id, agent)
            VALUES ($1, $2)
            ON CONFLICT (user_id, agent) DO NOTHING
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(agent.slug())
        .fetch_optional(&self.pool)
        .await?;

        if let Some(hired) = inserted {
            info!("User {user_id} hired {}", agent.slug());
            return Ok(Hire::Created(hired));
        }

        let existing: HiredAgent =
            sqlx::query_as("SELECT * FROM hired_agents WHERE user_id = $1 AND agent = $2")
                .bind(user_id)
                .bind(agent.slug())
                .fetch_one(&self.pool)
                .await?;
        Ok(Hire::Existing(existing))
    }

    async fn list(&self, user_id: Uuid) -> Result<Vec<HiredAgent>, AppError> {
        Ok(sqlx::query_as::<_, HiredAgent>(
            "SELECT * FROM hired_agents WHERE user_id = $1 ORDER BY hired_at DESC",
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?)
    }

    async fn release(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM hired_agents WHERE id = $1 AND user_id = $2")
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
pub(crate) mod memory {
    use std::sync::Mutex;

    use chrono::Utc;

    use super::*;

    #[derive(Default)]
    pub struct MemoryHiredAgentStore {
        rows: Mutex<Vec<HiredAgent>>,
    }

    #[async_trait]
    impl HiredAgentStore for MemoryHiredAgentStore {
        async fn hire(&self, user_id: Uuid, agent: AgentKind) -> Result<Hire, AppError> {
            let mut rows = self.rows.lock().unwrap();
            if let Some(existing) = rows
                .iter()
                .find(|r| r.user_id == user_id && r.agent == agent.slug())
            {
                return Ok(Hire::Existing(existing.clone()));
            }
            let row = HiredAgent {
                id: Uuid::new_v4(),
                user_id,
                agent: agent.slug().to_string(),
                hired_at: Utc::now(),
            };
            rows.push(row.clone());
            Ok(Hire::Created(row))
        }

        async fn list(&self, user_id: Uuid) -> Result<Vec<HiredAgent>, AppError> {
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

        async fn release(&self, user_id: Uuid, id: Uuid) -> Result<bool, AppError> {
            let mut rows = self.rows.lock().unwrap();
            let before = rows.len();
            rows.retain(|r| !(r.id == id && r.user_id == user_id));
            Ok(rows.len() < before)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::memory::MemoryHiredAgentStore;
    use super::*;

    #[tokio::test]
    async fn test_hiring_twice_returns_the_first_record() {
        let store = MemoryHiredAgentStore::default();
        let user = Uuid::new_v4();

        let Hire::Created(first) = store.hire(user, AgentKind::CareerCoach).await.unwrap() else {
            panic!("first hire should create a record");
        };
        let second = store.hire(user, AgentKind::CareerCoach).await.unwrap();

        assert_eq!(second, Hire::Existing(first));
        assert_eq!(store.list(user).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_release_is_scoped_to_owner() {
        let store = MemoryHiredAgentStore::default();
        let owner = Uuid::new_v4();
        let stranger = Uuid::new_v4();
        let Hire::Created(hired) = store.hire(owner, AgentKind::SeoOptimizer).await.unwrap() else {
            panic!("first hire should create a record");
        };

        assert!(!store.release(stranger, hired.id).await.unwrap());
        assert_eq!(store.list(owner).await.unwrap().len(), 1);
        assert!(store.release(owner, hired.id).await.unwrap());
        assert!(store.list(owner).await.unwrap().is_empty());
    }
}
