use anyhow::{bail, Context, Result};

use crate::llm_client::Provider;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    /// Base URL used to build public links to uploaded objects.
    pub s3_public_url: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub jwt_secret: String,
    pub session_ttl_minutes: i64,
    pub llm_provider: Provider,
    pub llm_model: String,
    /// Missing key is not a startup error: generation calls fail individually.
    pub llm_api_key: Option<String>,
    pub linkedin_api_key: Option<String>,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let s3_endpoint = require_env("S3_ENDPOINT")?;
        let llm_provider: Provider = optional_env("LLM_PROVIDER")
            .unwrap_or_else(|| "gemini".to_string())
            .parse()?;

        let jwt_secret = require_env("JWT_SECRET")?;
        if jwt_secret.len() < 32 {
            bail!("JWT_SECRET must be at least 32 characters");
        }

        Ok(Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_public_url: optional_env("S3_PUBLIC_URL").unwrap_or_else(|| s3_endpoint.clone()),
            s3_endpoint,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            jwt_secret,
            session_ttl_minutes: optional_env("SESSION_TTL_MINUTES")
                .unwrap_or_else(|| "60".to_string())
                .parse::<i64>()
                .context("SESSION_TTL_MINUTES must be a whole number of minutes")?,
            llm_model: optional_env("LLM_MODEL")
                .unwrap_or_else(|| llm_provider.default_model().to_string()),
            llm_provider,
            llm_api_key: optional_env("LLM_API_KEY"),
            linkedin_api_key: optional_env("LINKEDIN_API_KEY"),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Treats an empty value the same as an unset one.
fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
