use axum::{extract::State, http::StatusCode, Json};
use serde::Deserialize;
use tracing::info;
use uuid::Uuid;

use crate::auth::password::{dummy_hash, hash_password, validate_credentials, verify_password};
use crate::auth::tokens::TokenResponse;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::user::{User, UserSummary};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct Credentials {
    pub email: String,
    pub password: String,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn token_response(state: &AppState, user: User) -> Result<TokenResponse<UserSummary>, AppError> {
    let access_token = state.tokens.issue(user.id, &user.email)?;
    Ok(TokenResponse {
        access_token,
        token_type: "Bearer",
        expires_in: state.tokens.expires_in_seconds(),
        user: user.into(),
    })
}

/// POST /api/v1/auth/sign-up
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<(StatusCode, Json<TokenResponse<UserSummary>>), AppError> {
    validate_credentials(&req.email, &req.password)?;
    let email = normalize_email(&req.email);
    let password_hash = hash_password(&req.password)?;

    let mut tx = state.db.begin().await?;
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (id, email, password_hash) VALUES ($1, $2, $3) RETURNING *",
    )
    .bind(Uuid::new_v4())
    .bind(&email)
    .bind(&password_hash)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| match e {
        sqlx::Error::Database(ref db) if db.is_unique_violation() => {
            AppError::Conflict("An account with this email already exists".to_string())
        }
        other => AppError::Database(other),
    })?;

    sqlx::query("INSERT INTO profiles (user_id) VALUES ($1)")
        .bind(user.id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await?;

    info!("Created account {}", user.id);
    Ok((StatusCode::CREATED, Json(token_response(&state, user)?)))
}

/// POST /api/v1/auth/sign-in
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<Credentials>,
) -> Result<Json<TokenResponse<UserSummary>>, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE email = $1")
        .bind(normalize_email(&req.email))
        .fetch_optional(&state.db)
        .await?;

    let user = check_credentials(user, &req.password)?;

    info!("User {} signed in", user.id);
    Ok(Json(token_response(&state, user)?))
}

/// Same rejection and the same hashing work for an unknown email and a
/// wrong password.
fn check_credentials(user: Option<User>, password: &str) -> Result<User, AppError> {
    let stored = user.as_ref().map_or(dummy_hash(), |u| u.password_hash.as_str());
    let verified = verify_password(password, stored);
    user.filter(|_| verified).ok_or(AppError::Unauthorized)
}

/// POST /api/v1/auth/sign-out
pub async fn handle_sign_out(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<StatusCode, AppError> {
    state
        .revocations
        .revoke(&auth.claims.jti, auth.claims.remaining_seconds())
        .await?;
    info!("User {} signed out", auth.user_id);
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
pub async fn handle_session(
    State(state): State<AppState>,
    auth: AuthUser,
) -> Result<Json<UserSummary>, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE id = $1")
        .bind(auth.user_id)
        .fetch_optional(&state.db)
        .await?;
    // A valid token for a deleted account is treated as signed out.
    let user = user.ok_or(AppError::Unauthorized)?;
    Ok(Json(user.into()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email_is_normalized() {
        assert_eq!(normalize_email("  Ada@Example.COM "), "ada@example.com");
    }

    fn user_with_password(password: &str) -> User {
        User {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            password_hash: hash_password(password).unwrap(),
            created_at: chrono::Utc::now(),
        }
    }

    #[test]
    fn test_unknown_email_and_wrong_password_are_both_unauthorized() {
        assert!(matches!(
            check_credentials(None, "hunter22"),
            Err(AppError::Unauthorized)
        ));
        assert!(matches!(
            check_credentials(Some(user_with_password("hunter22")), "hunter23"),
            Err(AppError::Unauthorized)
        ));
    }

    #[test]
    fn test_matching_password_signs_in() {
        let user = user_with_password("hunter22");
        let id = user.id;
        assert_eq!(check_credentials(Some(user), "hunter22").unwrap().id, id);
    }

    #[test]
    fn test_credentials_deserialize() {
        let creds: Credentials =
            serde_json::from_str(r#"{"email": "ada@example.com", "password": "hunter22"}"#)
                .unwrap();
        assert_eq!(creds.email, "ada@example.com");
    }
}
