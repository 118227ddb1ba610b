//! Multipart extraction for audio uploads

use axum::body::Body;

/// Audio file pulled from a multipart form
#[derive(Debug)]
pub struct AudioUpload {
    /// Raw audio data
    pub audio: Vec<u8>,
    /// Original filename
    pub filename: String,
    /// Content type of the audio file
    pub content_type: String,
}

/// MIME types the transcription endpoint accepts
pub const ALLOWED_TYPES: &[&str] = &["audio/wav", "audio/mpeg", "audio/mp3", "audio/webm"];

/// Extractor for multipart form data containing an `audio` field
pub struct ExtractAudio(pub AudioUpload);

/// Body limit for audio uploads (32 MiB)
const BODY_LIMIT_BYTES: usize = 32 << 20;

impl<S> axum::extract::FromRequest<S> for ExtractAudio
where
    S: Send + Sync,
{
    type Rejection = axum::response::Response;

    async fn from_request(request: http::Request<Body>, _state: &S) -> Result<Self, Self::Rejection> {
        use axum::response::IntoResponse;

        let (parts, body) = request.into_parts();

        // Verify content type is multipart/form-data
        let content_type = parts
            .headers
            .get(http::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("");

        if !content_type.starts_with("multipart/form-data") {
            return Err((
                axum::http::StatusCode::UNSUPPORTED_MEDIA_TYPE,
                "Unsupported Content-Type, expected: 'Content-Type: multipart/form-data'",
            )
                .into_response());
        }

        let bytes = axum::body::to_bytes(body, BODY_LIMIT_BYTES).await.map_err(|err| {
            (
                axum::http::StatusCode::BAD_REQUEST,
                format!("Failed to read request body: {err}"),
            )
                .into_response()
        })?;

        // Reassemble the request for multipart parsing
        let mut rebuilt = http::Request::builder().method(parts.method.clone()).uri(parts.uri.clone());

        for (key, value) in &parts.headers {
            rebuilt = rebuilt.header(key, value);
        }

        let rebuilt = rebuilt.body(Body::from(bytes)).map_err(|e| {
            (
                axum::http::StatusCode::INTERNAL_SERVER_ERROR,
                format!("Failed to rebuild request: {e}"),
            )
                .into_response()
        })?;

        let mut multipart = axum::extract::Multipart::from_request(rebuilt, &()).await.map_err(|e| {
            (
                axum::http::StatusCode::BAD_REQUEST,
                format!("Failed to parse multipart form: {e}"),
            )
                .into_response()
        })?;

        let mut upload: Option<AudioUpload> = None;

        while let Ok(Some(field)) = multipart.next_field().await {
            if field.name() != Some("audio") {
                continue;
            }

            let filename = field.file_name().unwrap_or("audio.wav").to_owned();
            let content_type = field.content_type().unwrap_or("audio/wav").to_owned();

            let data = field.bytes().await.map_err(|e| {
                (
                    axum::http::StatusCode::BAD_REQUEST,
                    format!("Failed to read audio field: {e}"),
                )
                    .into_response()
            })?;

            upload = Some(AudioUpload {
                audio: data.to_vec(),
                filename,
                content_type,
            });
        }

        let Some(upload) = upload else {
            return Err(crate::error::TranscribeError::InvalidRequest("No audio file provided".to_owned()).into());
        };

        Ok(Self(upload))
    }
}

impl From<crate::error::TranscribeError> for axum::response::Response {
    fn from(error: crate::error::TranscribeError) -> Self {
        use axum::response::IntoResponse;
        solace_core::ApiError::from(error).into_response()
    }
}
