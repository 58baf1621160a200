use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HiredAgent {
    pub id: Uuid,
    pub user_id: Uuid,
    pub agent: String,
    pub hired_at: DateTime<Utc>,
}
