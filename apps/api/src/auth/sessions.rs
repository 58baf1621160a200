//! Revoked-token list. Keys expire on their own once the token would have.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use tracing::info;

use crate::errors::AppError;

const KEY_PREFIX: &str = "revoked:";

#[async_trait]
pub trait RevocationList: Send + Sync {
    async fn revoke(&self, jti: &str, ttl_seconds: i64) -> Result<(), AppError>;

    async fn is_revoked(&self, jti: &str) -> Result<bool, AppError>;
}

#[derive(Clone)]
pub struct RedisRevocationList {
    manager: ConnectionManager,
}

impl RedisRevocationList {
    pub async fn connect(client: redis::Client) -> Result<Self, AppError> {
        let manager = client.get_connection_manager().await?;
        info!("Redis connection manager ready");
        Ok(Self { manager })
    }
}

#[async_trait]
impl RevocationList for RedisRevocationList {
    async fn revoke(&self, jti: &str, ttl_seconds: i64) -> Result<(), AppError> {
        if ttl_seconds <= 0 {
            return Ok(());
        }
        let mut conn = self.manager.clone();
        redis::cmd("SET")
            .arg(format!("{KEY_PREFIX}{jti}"))
            .arg("1")
            .arg("EX")
            .arg(ttl_seconds)
            .query_async::<_, ()>(&mut conn)
            .await?;
        Ok(())
    }

    async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
        let mut conn = self.manager.clone();
        let exists: bool = redis::cmd("EXISTS")
            .arg(format!("{KEY_PREFIX}{jti}"))
            .query_async(&mut conn)
            .await?;
        Ok(exists)
    }
}

#[cfg(test)]
pub(crate) mod memory {
    use std::collections::HashSet;
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct MemoryRevocationList {
        revoked: Mutex<HashSet<String>>,
    }

    #[async_trait]
    impl RevocationList for MemoryRevocationList {
        async fn revoke(&self, jti: &str, ttl_seconds: i64) -> Result<(), AppError> {
            if ttl_seconds > 0 {
                self.revoked.lock().unwrap().insert(jti.to_string());
            }
            Ok(())
        }

        async fn is_revoked(&self, jti: &str) -> Result<bool, AppError> {
            Ok(self.revoked.lock().unwrap().contains(jti))
        }
    }
}
