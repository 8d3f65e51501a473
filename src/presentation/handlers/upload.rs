use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;

use crate::domain::ContentType;
use crate::presentation::state::AppState;

#[derive(Serialize)]
pub struct UploadResponse {
    pub text: String,
    pub summary: String,
    pub paragraphs: Vec<String>,
    pub questions: Vec<String>,
    pub answers: Vec<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

fn error_response(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
        .into_response()
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    // Walk the form for the "file" field; anything else is ignored.
    let field = loop {
        match multipart.next_field().await {
            Ok(Some(f)) if f.name() == Some("file") => break f,
            Ok(Some(_)) => continue,
            Ok(None) => {
                tracing::warn!("Upload request without a file field");
                return error_response(StatusCode::BAD_REQUEST, "No file part");
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to read multipart");
                // e.status() is 413 when the body limit tripped, 400 for
                // malformed multipart.
                return error_response(e.status(), format!("Failed to read multipart: {}", e));
            }
        }
    };

    let filename = field.file_name().unwrap_or("").to_string();
    if filename.is_empty() {
        tracing::warn!("Upload request with empty filename");
        return error_response(StatusCode::BAD_REQUEST, "No file selected");
    }

    let declared_mime = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    let content_type = match ContentType::from_mime(&declared_mime)
        .or_else(|| ContentType::from_filename(&filename))
    {
        Some(ct) => ct,
        None => {
            tracing::warn!(content_type = %declared_mime, filename = %filename, "Unsupported upload type");
            return error_response(
                StatusCode::UNSUPPORTED_MEDIA_TYPE,
                format!("Unsupported content type: {}", declared_mime),
            );
        }
    };

    let data = match field.bytes().await {
        Ok(d) => d,
        Err(e) => {
            tracing::error!(error = %e, "Failed to read file bytes");
            return error_response(e.status(), format!("Failed to read file: {}", e));
        }
    };

    if data.len() > state.settings.max_upload_bytes() {
        tracing::warn!(bytes = data.len(), "Upload exceeds size limit");
        return error_response(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "File exceeds the {} MB upload limit",
                state.settings.uploads.max_file_size_mb
            ),
        );
    }

    tracing::debug!(filename = %filename, bytes = data.len(), "Processing file upload");

    if let Err(e) = state.upload_store.store(&filename, data.clone()).await {
        tracing::error!(error = %e, "Failed to persist upload");
        return error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("Failed to store upload: {}", e),
        );
    }

    let analysis = match state
        .analysis_service
        .analyze(&data, filename, content_type)
        .await
    {
        Ok(a) => a,
        Err(e) => {
            tracing::error!(error = %e, "Document analysis failed");
            return error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string());
        }
    };

    let (questions, answers) = analysis
        .qa_pairs
        .into_iter()
        .map(|qa| (qa.question, qa.answer))
        .unzip();

    (
        StatusCode::OK,
        Json(UploadResponse {
            text: analysis.text,
            summary: analysis.summary,
            paragraphs: analysis.paragraphs,
            questions,
            answers,
        }),
    )
        .into_response()
}
