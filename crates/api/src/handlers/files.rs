//! Handlers for the `/files` resource: generic upload and presigned
//! download URLs.

use axum::extract::{Multipart, Path, State};
use axum::Json;
use chrono::Utc;
use onboard_core::types::Timestamp;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;
use crate::storage::object_key;

/// Response body for `POST /files/upload`.
#[derive(Debug, Serialize)]
pub struct FileUploadResponse {
    pub file_name: String,
    pub file_url: String,
    pub upload_date: Timestamp,
}

/// Response body for `GET /files/download/{filename}`.
#[derive(Debug, Serialize)]
pub struct DownloadUrlResponse {
    pub url: String,
}

/// POST /api/files/upload
///
/// Accept a multipart `file` field, store the bytes in blob storage, and
/// return the retrievable URL. Only the URL is persisted by callers.
pub async fn upload_file(
    State(state): State<AppState>,
    auth: AuthUser,
    multipart: Multipart,
) -> AppResult<Json<FileUploadResponse>> {
    let (file_name, content_type, bytes) = read_file_field(multipart).await?;

    let key = object_key(&file_name);
    let file_url = state.blob.put_object(&key, bytes, &content_type).await?;

    tracing::info!(user_id = auth.user_id, key, "File uploaded");

    Ok(Json(FileUploadResponse {
        file_name,
        file_url,
        upload_date: Utc::now(),
    }))
}

/// GET /api/files/download/{filename}
///
/// Produce a time-limited presigned download URL for a stored object.
pub async fn download_file(
    State(state): State<AppState>,
    _auth: AuthUser,
    Path(filename): Path<String>,
) -> AppResult<Json<DownloadUrlResponse>> {
    let url = state.blob.presigned_url(&filename).await?;
    Ok(Json(DownloadUrlResponse { url }))
}

/// Pull the required `file` field out of a multipart body.
///
/// Returns `(file_name, content_type, bytes)`; unknown fields are ignored.
pub(crate) async fn read_file_field(
    mut multipart: Multipart,
) -> Result<(String, String, Vec<u8>), AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().unwrap_or("upload.bin").to_string();
        let content_type = field
            .content_type()
            .unwrap_or("application/octet-stream")
            .to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(e.to_string()))?;

        return Ok((file_name, content_type, bytes.to_vec()));
    }

    Err(AppError::BadRequest("No file uploaded".into()))
}
