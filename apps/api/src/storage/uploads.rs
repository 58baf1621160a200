//! Upload records and the put-then-record flow.
//!
//! The object is written first and the row second. When the row cannot be
//! written the object is deleted again, so storage never holds files that
//! no user can list.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::upload::{NewUpload, UploadRow};
use crate::storage::{object_key, ObjectStore, UploadKind, MAX_UPLOAD_BYTES};

#[async_trait]
pub trait UploadStore: Send + Sync {
    async fn insert(&self, upload: NewUpload) -> Result<UploadRow, AppError>;

    /// Newest first, optionally filtered by kind.
    async fn list(&self, user_id: Uuid, kind: Option<UploadKind>)
        -> Result<Vec<UploadRow>, AppError>;
}

pub struct PgUploadStore {
    pool: PgPool,
}

impl PgUploadStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UploadStore for PgUploadStore {
    async fn insert(&self, upload: NewUpload) -> Result<UploadRow, AppError> {
        Ok(sqlx::query_as::<_, UploadRow>(
            r#"
            INSERT INTO uploads
                (id, user_id, kind, category, file_name, content_type, size_bytes, s3_key, public_url)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(upload.user_id)
        .bind(&upload.kind)
        .bind(&upload.category)
        .bind(&upload.file_name)
        .bind(&upload.content_type)
        .bind(upload.size_bytes)
        .bind(&upload.s3_key)
        .bind(&upload.public_url)
        .fetch_one(&self.pool)
        .await?)
    }

    async fn list(
        &self,
        user_id: Uuid,
        kind: Option<UploadKind>,
    ) -> Result<Vec<UploadRow>, AppError> {
        Ok(sqlx::query_as::<_, UploadRow>(
            r#"
            SELECT * FROM uploads
            WHERE user_id = $1 AND ($2::TEXT IS NULL OR kind = $2)
            ORDER BY created_at DESC
            "#,
        )
        .bind(user_id)
        .bind(kind.map(UploadKind::as_str))
        .fetch_all(&self.pool)
        .await?)
    }
}

/// A file part read from a multipart body.
#[derive(Debug, Clone)]
pub struct IncomingFile {
    pub file_name: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl IncomingFile {
    fn validate(&self, kind: UploadKind) -> Result<(), AppError> {
        if self.data.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        if self.data.len() > MAX_UPLOAD_BYTES {
            return Err(AppError::Validation(format!(
                "File too large (max {} MB)",
                MAX_UPLOAD_BYTES / (1024 * 1024)
            )));
        }
        if !kind.accepts(&self.content_type) {
            return Err(AppError::Validation(format!(
                "A {} upload cannot be of type {}",
                kind.as_str(),
                self.content_type
            )));
        }
        Ok(())
    }
}

pub async fn store_upload(
    objects: &dyn ObjectStore,
    uploads: &dyn UploadStore,
    user_id: Uuid,
    kind: UploadKind,
    category: Option<String>,
    file: IncomingFile,
) -> Result<UploadRow, AppError> {
    file.validate(kind)?;

    let key = object_key(kind, user_id, &file.file_name);
    let size_bytes = file.data.len() as i64;
    objects.put(&key, file.data, &file.content_type).await?;

    let record = NewUpload {
        user_id,
        kind: kind.as_str().to_string(),
        category,
        file_name: file.file_name,
        content_type: file.content_type,
        size_bytes,
        public_url: objects.public_url(&key),
        s3_key: key.clone(),
    };

    match uploads.insert(record).await {
        Ok(row) => {
            info!(
                "Stored {} upload {} ({} bytes) for user {user_id}",
                kind.as_str(),
                row.id,
                size_bytes
            );
            Ok(row)
        }
        Err(e) => {
            if let Err(cleanup) = objects.delete(&key).await {
                warn!("Failed to remove orphaned object {key}: {cleanup}");
            }
            Err(e)
        }
    }
}
