use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};
use uuid::Uuid;

use crate::auth::tokens::Claims;
use crate::errors::AppError;
use crate::state::AppState;

/// A signed-in caller. Rejects with 401 when the bearer token is missing,
/// invalid, expired, or revoked.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: Uuid,
    pub claims: Claims,
}

/// Like `AuthUser`, but a request without an `Authorization` header is
/// let through as `None`. A header that is present must still be valid.
#[derive(Debug, Clone)]
pub struct MaybeAuthUser(pub Option<AuthUser>);

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

async fn authenticate(token: &str, state: &AppState) -> Result<AuthUser, AppError> {
    let claims = state.tokens.validate(token)?;
    if state.revocations.is_revoked(&claims.jti).await? {
        return Err(AppError::Unauthorized);
    }
    Ok(AuthUser {
        user_id: claims.sub,
        claims,
    })
}

#[axum::async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        authenticate(token, state).await
    }
}

#[axum::async_trait]
impl FromRequestParts<AppState> for MaybeAuthUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        match bearer_token(parts) {
            None => Ok(MaybeAuthUser(None)),
            Some(token) => authenticate(token, state).await.map(|u| MaybeAuthUser(Some(u))),
        }
    }
}
