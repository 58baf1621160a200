use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::profile::{Profile, StylePreferences};
use crate::profile::style::load_style_preferences;
use crate::state::AppState;

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Default, Deserialize)]
pub struct ProfileUpdate {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub title: Option<String>,
    pub role: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub company_website: Option<String>,
    pub linkedin_url: Option<String>,
    pub writing_style: Option<String>,
    pub email_notifications: Option<bool>,
    pub marketing_emails: Option<bool>,
}

impl ProfileUpdate {
    fn validate(&self) -> Result<(), AppError> {
        for (field, value) in [
            ("company_website", &self.company_website),
            ("linkedin_url", &self.linkedin_url),
        ] {
            if let Some(url) = value.as_deref().map(str::trim).filter(|u| !u.is_empty()) {
                if !(url.starts_with("http://") || url.starts_with("https://")) {
                    return Err(AppError::Validation(format!(
                        "{field} must start with http:// or https://"
                    )));
                }
            }
        }
        Ok(())
    }
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<Profile>, AppError> {
    let profile: Option<Profile> = sqlx::query_as("SELECT * FROM profiles WHERE user_id = $1")
        .bind(auth.user_id)
        .fetch_optional(&state.db)
        .await?;
    profile
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))
}

/// PUT /api/v1/profile
pub async fn handle_update_profile(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<Profile>, AppError> {
    update.validate()?;
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profiles (user_id) VALUES ($1)
        ON CONFLICT (user_id) DO UPDATE SET
            first_name          = COALESCE($2,  profiles.first_name),
            last_name           = COALESCE($3,  profiles.last_name),
            title               = COALESCE($4,  profiles.title),
            role                = COALESCE($5,  profiles.role),
            city                = COALESCE($6,  profiles.city),
            country             = COALESCE($7,  profiles.country),
            company_website     = COALESCE($8,  profiles.company_website),
            linkedin_url        = COALESCE($9,  profiles.linkedin_url),
            writing_style       = COALESCE($10, profiles.writing_style),
            email_notifications = COALESCE($11, profiles.email_notifications),
            marketing_emails    = COALESCE($12, profiles.marketing_emails),
            updated_at          = NOW()
        RETURNING *
        "#,
    )
    .bind(auth.user_id)
    .bind(&update.first_name)
    .bind(&update.last_name)
    .bind(&update.title)
    .bind(&update.role)
    .bind(&update.city)
    .bind(&update.country)
    .bind(&update.company_website)
    .bind(&update.linkedin_url)
    .bind(&update.writing_style)
    .bind(update.email_notifications)
    .bind(update.marketing_emails)
    .fetch_one(&state.db)
    .await?;

    info!("Updated profile for user {}", auth.user_id);
    Ok(Json(profile))
}

/// GET /api/v1/profile/style-preferences
/// A user who never saved preferences gets the empty set.
pub async fn handle_get_style_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<StylePreferences>, AppError> {
    let prefs = load_style_preferences(&state.db, auth.user_id).await?;
    Ok(Json(prefs.unwrap_or_default()))
}

/// PUT /api/v1/profile/style-preferences
pub async fn handle_put_style_preferences(
    State(state): State<AppState>,
    auth: AuthUser,
    Json(prefs): Json<StylePreferences>,
) -> Result<Json<StylePreferences>, AppError> {
    let saved = sqlx::query_as::<_, StylePreferences>(
        r#"
        INSERT INTO style_preferences
            (user_id, style_type, body_type, favorite_colors, budget_range)
        VALUES ($1, $2, $3, $4, $5)
        ON CONFLICT (user_id) DO UPDATE SET
            style_type      = EXCLUDED.style_type,
            body_type       = EXCLUDED.body_type,
            favorite_colors = EXCLUDED.favorite_colors,
            budget_range    = EXCLUDED.budget_range,
            updated_at      = NOW()
        RETURNING style_type, body_type, favorite_colors, budget_range
        "#,
    )
    .bind(auth.user_id)
    .bind(&prefs.style_type)
    .bind(&prefs.body_type)
    .bind(&prefs.favorite_colors)
    .bind(&prefs.budget_range)
    .fetch_one(&state.db)
    .await?;
    Ok(Json(saved))
}
