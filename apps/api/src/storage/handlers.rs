use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::upload::UploadRow;
use crate::state::AppState;
use crate::storage::uploads::{store_upload, IncomingFile};
use crate::storage::UploadKind;

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub id: Uuid,
    pub key: String,
    pub public_url: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadListQuery {
    pub kind: Option<String>,
}

fn parse_kind(kind: &str) -> Result<UploadKind, AppError> {
    UploadKind::parse(kind).ok_or_else(|| {
        AppError::Validation(format!(
            "Unknown upload kind '{kind}' (expected resume, wardrobe, academic or document)"
        ))
    })
}

/// POST /api/v1/uploads/:kind
/// Multipart body: `file` (required), `category` (optional).
pub async fn handle_upload(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(kind): Path<String>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>), AppError> {
    let kind = parse_kind(&kind)?;

    let mut file: Option<IncomingFile> = None;
    let mut category: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Failed to read multipart field: {e}")))?
    {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file bytes: {e}")))?
                    .to_vec();
                file = Some(IncomingFile {
                    file_name,
                    content_type,
                    data,
                });
            }
            Some("category") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Invalid category field: {e}")))?;
                category = Some(value.trim().to_string()).filter(|c| !c.is_empty());
            }
            _ => {}
        }
    }

    let file = file.ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;
    let row = store_upload(
        state.objects.as_ref(),
        state.uploads.as_ref(),
        auth.user_id,
        kind,
        category,
        file,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UploadResponse {
            id: row.id,
            key: row.s3_key,
            public_url: row.public_url,
        }),
    ))
}

/// GET /api/v1/uploads[?kind=]
pub async fn handle_list_uploads(
    State(state): State<AppState>,
    auth: AuthUser,
    Query(params): Query<UploadListQuery>,
) -> Result<Json<Vec<UploadRow>>, AppError> {
    let kind = params.kind.as_deref().map(parse_kind).transpose()?;
    Ok(Json(state.uploads.list(auth.user_id, kind).await?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_is_a_validation_error() {
        assert!(matches!(parse_kind("selfie"), Err(AppError::Validation(_))));
        assert_eq!(parse_kind("academic").unwrap(), UploadKind::Academic);
    }
}
