use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SavedJob {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub url: String,
    pub platform: String,
    pub match_percentage: i32,
    pub notes: Option<String>,
    pub saved_at: DateTime<Utc>,
}

#[derive(Debug, Clone)]
pub struct NewSavedJob {
    pub user_id: Uuid,
    pub title: String,
    pub company: String,
    pub location: Option<String>,
    pub url: String,
    pub platform: String,
    pub match_percentage: u8,
    pub notes: Option<String>,
}
