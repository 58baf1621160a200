use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::FromRow;
use uuid::Uuid;

/// One saved generation. `output_text` is stored exactly as the model returned it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct HistoryRecord {
    pub id: Uuid,
    pub user_id: Uuid,
    pub agent: String,
    pub service: String,
    pub input_text: String,
    pub context: Value,
    pub output_text: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewHistoryRecord {
    pub user_id: Uuid,
    pub agent: String,
    pub service: String,
    pub input_text: String,
    pub context: Value,
    pub output_text: String,
}
