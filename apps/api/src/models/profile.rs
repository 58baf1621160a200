use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Profile {
    pub user_id: Uuid,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub role: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub company_website: Option<String>,
    pub linkedin_url: Option<String>,
    pub writing_style: Option<String>,
    pub email_notifications: bool,
    pub marketing_emails: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(default)]
pub struct StylePreferences {
    pub style_type: Vec<String>,
    pub body_type: Option<String>,
    pub favorite_colors: Vec<String>,
    pub budget_range: Option<String>,
}
