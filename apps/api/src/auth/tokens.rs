//! HS256 access tokens.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// User id.
    pub sub: Uuid,
    pub email: String,
    pub exp: i64,
    pub iat: i64,
    /// Token id, the key of the revocation list.
    pub jti: String,
}

impl Claims {
    /// Seconds until expiry, floored at zero.
    pub fn remaining_seconds(&self) -> i64 {
        (self.exp - Utc::now().timestamp()).max(0)
    }
}

#[derive(Debug, Serialize)]
pub struct TokenResponse<U: Serialize> {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: i64,
    pub user: U,
}

#[derive(Clone)]
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl_minutes: i64,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl_minutes: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl_minutes,
        }
    }

    pub fn expires_in_seconds(&self) -> i64 {
        self.ttl_minutes * 60
    }

    pub fn issue(&self, user_id: Uuid, email: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id,
            email: email.to_string(),
            exp: (now + Duration::minutes(self.ttl_minutes)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to encode access token: {e}")))
    }

    /// Any signature, expiry or shape problem is `Unauthorized`.
    pub fn validate(&self, token: &str) -> Result<Claims, AppError> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!("Rejected access token: {e}");
                AppError::Unauthorized
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    #[test]
    fn test_issue_then_validate() {
        let issuer = TokenIssuer::new(SECRET, 60);
        let user = Uuid::new_v4();
        let token = issuer.issue(user, "ada@example.com").unwrap();

        let claims = issuer.validate(&token).unwrap();
        assert_eq!(claims.sub, user);
        assert_eq!(claims.email, "ada@example.com");
        assert!(claims.remaining_seconds() > 3500);
    }

    #[test]
    fn test_each_token_gets_a_fresh_jti() {
        let issuer = TokenIssuer::new(SECRET, 60);
        let user = Uuid::new_v4();
        let a = issuer.validate(&issuer.issue(user, "a@b.c").unwrap()).unwrap();
        let b = issuer.validate(&issuer.issue(user, "a@b.c").unwrap()).unwrap();
        assert_ne!(a.jti, b.jti);
    }

    #[test]
    fn test_wrong_secret_is_unauthorized() {
        let issuer = TokenIssuer::new(SECRET, 60);
        let other = TokenIssuer::new("another-secret-that-is-also-32-bytes!!", 60);
        let token = other.issue(Uuid::new_v4(), "a@b.c").unwrap();
        assert!(matches!(issuer.validate(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_expired_token_is_unauthorized() {
        // Past the default 60s leeway.
        let issuer = TokenIssuer::new(SECRET, -5);
        let token = issuer.issue(Uuid::new_v4(), "a@b.c").unwrap();
        assert!(matches!(issuer.validate(&token), Err(AppError::Unauthorized)));
    }

    #[test]
    fn test_garbage_is_unauthorized() {
        let issuer = TokenIssuer::new(SECRET, 60);
        assert!(matches!(issuer.validate("not.a.jwt"), Err(AppError::Unauthorized)));
    }
}
