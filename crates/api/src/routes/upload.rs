//! Upload route
//!
//! One multipart endpoint feeding the ingestion pipeline.

use axum::extract::{Multipart, State};
use axum::routing::post;
use axum::{Json, Router};

use logtide_protocol::UploadManifest;

use crate::error::{ApiError, Result};
use crate::state::AppState;

/// Upload routes
pub fn routes() -> Router<AppState> {
    Router::new().route("/upload", post(upload_handler))
}

/// Upload endpoint
///
/// POST /upload
///
/// Expects a multipart body with a `file` field. Returns the upload
/// manifest on success; a missing field, a missing filename or an empty
/// payload is a 400.
async fn upload_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadManifest>> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::BadRequest(format!("malformed multipart body: {err}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let Some(name) = field
            .file_name()
            .map(str::to_owned)
            .filter(|name| !name.is_empty())
        else {
            return Err(ApiError::BadRequest("no file selected".into()));
        };

        let data = field
            .bytes()
            .await
            .map_err(|err| ApiError::BadRequest(format!("failed to read upload: {err}")))?;

        let manifest = state.pipeline.ingest(&data, &name).await?;
        return Ok(Json(manifest));
    }

    Err(ApiError::BadRequest("missing multipart field 'file'".into()))
}
