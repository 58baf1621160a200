use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct UploadRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub kind: String,
    pub category: Option<String>,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub s3_key: String,
    pub public_url: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewUpload {
    pub user_id: Uuid,
    pub kind: String,
    pub category: Option<String>,
    pub file_name: String,
    pub content_type: String,
    pub size_bytes: i64,
    pub s3_key: String,
    pub public_url: String,
}
