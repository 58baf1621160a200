//! Object storage for user uploads (S3 or MinIO).

pub mod handlers;
pub mod uploads;

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client as S3Client;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;

/// Largest accepted upload.
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Request body limit for upload routes: the file plus room for multipart
/// boundaries, part headers and the `category` field.
pub const UPLOAD_BODY_LIMIT: usize = MAX_UPLOAD_BYTES + 64 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UploadKind {
    Resume,
    Wardrobe,
    Academic,
    Document,
}

impl UploadKind {
    pub fn as_str(self) -> &'static str {
        match self {
            UploadKind::Resume => "resume",
            UploadKind::Wardrobe => "wardrobe",
            UploadKind::Academic => "academic",
            UploadKind::Document => "document",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "resume" => Some(UploadKind::Resume),
            "wardrobe" => Some(UploadKind::Wardrobe),
            "academic" => Some(UploadKind::Academic),
            "document" => Some(UploadKind::Document),
            _ => None,
        }
    }

    /// Wardrobe items are photos; everything else is a document of any type.
    pub fn accepts(self, content_type: &str) -> bool {
        match self {
            UploadKind::Wardrobe => content_type.starts_with("image/"),
            _ => true,
        }
    }
}

/// Where upload bytes live. Production uses `S3ObjectStore`.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError>;

    async fn delete(&self, key: &str) -> Result<(), AppError>;

    fn public_url(&self, key: &str) -> String;
}

pub struct S3ObjectStore {
    client: S3Client,
    bucket: String,
    public_base: String,
}

impl S3ObjectStore {
    pub fn new(client: S3Client, bucket: String, public_base: String) -> Self {
        Self {
            client,
            bucket,
            public_base: public_base.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ObjectStore for S3ObjectStore {
    async fn put(&self, key: &str, data: Vec<u8>, content_type: &str) -> Result<(), AppError> {
        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(key)
            .body(ByteStream::from(data))
            .content_type(content_type)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

        info!("Uploaded s3://{}/{}", self.bucket, key);
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), AppError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| AppError::Storage(format!("S3 delete failed: {e}")))?;

        info!("Deleted s3://{}/{}", self.bucket, key);
        Ok(())
    }

    fn public_url(&self, key: &str) -> String {
        object_url(&self.public_base, &self.bucket, key)
    }
}

fn object_url(base: &str, bucket: &str, key: &str) -> String {
    format!("{base}/{bucket}/{key}")
}

/// `<kind>/<user>/<random>-<sanitized name>`
pub fn object_key(kind: UploadKind, user_id: Uuid, file_name: &str) -> String {
    format!(
        "{}/{}/{}-{}",
        kind.as_str(),
        user_id,
        Uuid::new_v4(),
        sanitize_file_name(file_name)
    )
}

fn sanitize_file_name(name: &str) -> String {
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if cleaned.trim_matches(['.', '_']).is_empty() {
        "file".to_string()
    } else {
        cleaned
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_parsing() {
        assert_eq!(UploadKind::parse("Resume"), Some(UploadKind::Resume));
        assert_eq!(UploadKind::parse("wardrobe"), Some(UploadKind::Wardrobe));
        assert_eq!(UploadKind::parse("avatar"), None);
    }

    #[test]
    fn test_wardrobe_only_accepts_images() {
        assert!(UploadKind::Wardrobe.accepts("image/jpeg"));
        assert!(!UploadKind::Wardrobe.accepts("application/pdf"));
        assert!(UploadKind::Resume.accepts("application/pdf"));
    }

    #[test]
    fn test_object_key_is_scoped_and_sanitized() {
        let user = Uuid::new_v4();
        let key = object_key(UploadKind::Resume, user, "../../My Resume (final).pdf");
        assert!(key.starts_with(&format!("resume/{user}/")));
        assert!(key.ends_with("-My_Resume__final_.pdf"));
        assert!(!key.contains(".."));
    }

    #[test]
    fn test_empty_name_gets_placeholder() {
        assert_eq!(sanitize_file_name(""), "file");
        assert_eq!(sanitize_file_name("///"), "file");
    }

    #[test]
    fn test_public_url_joins_base_bucket_and_key() {
        assert_eq!(
            object_url("http://localhost:9000", "uploads", "resume/u/x.pdf"),
            "http://localhost:9000/uploads/resume/u/x.pdf"
        );
    }
}
