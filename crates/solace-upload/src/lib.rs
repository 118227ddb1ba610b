#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod error;
pub mod validate;

use std::path::PathBuf;
use std::sync::Arc;

use axum::extract::{Multipart, State};
use axum::{Json, Router, routing::post};
use serde::Serialize;
use solace_core::ApiError;

pub use error::{Result, UploadError};
pub use validate::ALLOWED_TYPES;

/// Upload response body
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    /// Stored filename (generated, collision-resistant)
    pub filename: String,
    /// MIME type of the uploaded file
    #[serde(rename = "type")]
    pub content_type: String,
    /// Size in bytes
    pub size: u64,
}

/// Upload capability state
pub struct UploadState {
    dir: PathBuf,
    max_size_bytes: u64,
}

impl UploadState {
    pub fn new(dir: PathBuf, max_size_bytes: u64) -> Self {
        Self { dir, max_size_bytes }
    }

    /// Directory uploads are stored in
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Validate and store an uploaded file, returning the stored name
    ///
    /// Validation runs before any filesystem write, so a rejected upload
    /// leaves nothing on disk. The stored name is `<uuid>.<extension>`.
    pub async fn store(&self, content_type: &str, filename: &str, data: &[u8]) -> Result<String> {
        let valid = validate::validate(content_type, data.len() as u64, self.max_size_bytes, filename)?;

        tokio::fs::create_dir_all(&self.dir).await?;

        let stored_name = format!("{}.{}", uuid::Uuid::new_v4(), valid.extension);
        let path = self.dir.join(&stored_name);

        tokio::fs::write(&path, data).await?;

        tracing::debug!(path = %path.display(), size = data.len(), "file saved");

        Ok(stored_name)
    }
}

/// Build the upload state from configuration
pub fn build_state(config: &solace_config::Config) -> Arc<UploadState> {
    let uploads = config.uploads.clone().unwrap_or_default();
    Arc::new(UploadState::new(uploads.dir, uploads.max_size_bytes))
}

/// Transport-level body cap (64 MiB); oversized files still reach the
/// 25 MiB validation check and get a 400 rather than a bare 413
const BODY_LIMIT_BYTES: usize = 64 << 20;

/// Create the endpoint router for uploads
pub fn endpoint_router() -> Router<Arc<UploadState>> {
    Router::new()
        .route("/api/upload", post(upload))
        .layer(axum::extract::DefaultBodyLimit::max(BODY_LIMIT_BYTES))
}

/// Handle upload requests
async fn upload(
    State(state): State<Arc<UploadState>>,
    mut multipart: Multipart,
) -> std::result::Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::new(http::StatusCode::BAD_REQUEST, format!("Invalid form data: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let filename = field.file_name().unwrap_or_default().to_owned();
        let content_type = field.content_type().unwrap_or_default().to_owned();

        let data = field
            .bytes()
            .await
            .map_err(|e| ApiError::new(http::StatusCode::BAD_REQUEST, format!("Invalid form data: {e}")))?;

        tracing::debug!(
            filename = %filename,
            content_type = %content_type,
            size = data.len(),
            "received file"
        );

        let stored_name = state.store(&content_type, &filename, &data).await?;

        return Ok(Json(UploadResponse {
            success: true,
            filename: stored_name,
            content_type,
            size: data.len() as u64,
        }));
    }

    Err(UploadError::MissingFile.into())
}
