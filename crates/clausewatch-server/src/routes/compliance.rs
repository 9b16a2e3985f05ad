//! Compliance check routes — JSON text and multipart file upload.

use std::io::Write;
use std::path::Path;
use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use clausewatch_core::{ComplianceReport, Error, ErrorKind, RuleSet};
use clausewatch_runtime::AnalysisRequest;
use serde::Deserialize;
use tracing::{error, warn};

use crate::state::AppState;

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/compliance/check", post(check_text))
        .route("/compliance/check-file", post(check_file))
}

#[derive(Debug, Deserialize)]
pub struct CheckRequest {
    #[serde(default)]
    pub document_text: Option<String>,
    #[serde(default)]
    pub rules: RuleSet,
}

/// Pipeline error rendered as `{"status":"error","error":msg}`.
pub struct ApiError(Error);

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        Self(err)
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        Self(Error::Io(err))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self.0.kind() {
            ErrorKind::Input => StatusCode::BAD_REQUEST,
            ErrorKind::Document => StatusCode::UNPROCESSABLE_ENTITY,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        };
        if status == StatusCode::INTERNAL_SERVER_ERROR {
            error!("Compliance check failed: {}", self.0);
        } else {
            warn!("Compliance check rejected: {}", self.0);
        }

        (
            status,
            Json(serde_json::json!({
                "status": "error",
                "error": self.0.to_string(),
            })),
        )
            .into_response()
    }
}

/// POST /api/v1/compliance/check — analyze text sent as JSON.
async fn check_text(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<CheckRequest>, JsonRejection>,
) -> Result<Json<ComplianceReport>, ApiError> {
    let Json(request) =
        payload.map_err(|e| Error::InvalidInput(format!("Malformed request body: {}", e)))?;

    let text = request
        .document_text
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| Error::InvalidInput("document_text is required".into()))?;

    let report = state
        .coordinator
        .analyze(AnalysisRequest::from_text(text, request.rules))
        .await?;
    Ok(Json(report))
}

/// POST /api/v1/compliance/check-file — analyze an uploaded document.
///
/// Fields: `file` (required) and `forbidden_keywords` (comma separated). The
/// upload is written to a temp file in the uploads directory and removed
/// once the report is built.
async fn check_file(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ComplianceReport>, ApiError> {
    let mut upload: Option<(String, Vec<u8>)> = None;
    let mut rules = RuleSet::default();

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return Err(Error::InvalidInput(format!("Malformed upload: {}", e)).into()),
        };

        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "file" => {
                let filename = sanitize_filename(field.file_name().unwrap_or("upload"));
                let bytes = field
                    .bytes()
                    .await
                    .map_err(|e| Error::InvalidInput(format!("Read failed: {}", e)))?;
                upload = Some((filename, bytes.to_vec()));
            }
            "forbidden_keywords" => {
                let raw = field
                    .text()
                    .await
                    .map_err(|e| Error::InvalidInput(format!("Read failed: {}", e)))?;
                rules = RuleSet::from_comma_list(&raw);
            }
            _ => {}
        }
    }

    let (filename, bytes) =
        upload.ok_or_else(|| Error::InvalidInput("file field is required".into()))?;

    let suffix = Path::new(&filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()))
        .unwrap_or_default();

    let mut temp = tempfile::Builder::new()
        .prefix("upload-")
        .suffix(&suffix)
        .tempfile_in(&state.config.data_paths.uploads)?;
    temp.write_all(&bytes)?;
    temp.flush()?;

    let report = state
        .coordinator
        .analyze(AnalysisRequest::from_file(temp.path(), rules))
        .await;
    drop(temp);

    Ok(Json(report?))
}

/// Keep only the final path component of a client-supplied name.
fn sanitize_filename(name: &str) -> String {
    let name = name.replace(['/', '\\'], "").replace("..", "");
    Path::new(&name)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unnamed")
        .to_string()
}
