//! Route handlers.

use axum::body::Bytes;
use axum::extract::{Path, Query, State};
use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use comics_core::{Error, Record, RecordId, ReportError, ValidationMode};

use crate::error::ApiError;
use crate::state::AppState;

const CREATE_MODE: ValidationMode = ValidationMode::FailFast;
const UPDATE_MODE: ValidationMode = ValidationMode::CollectAll;

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    ciudad: Option<String>,
}

/// Ids that do not parse can never match a record.
fn parse_id(raw: &str) -> Result<RecordId, ApiError> {
    raw.parse().map_err(|_| ApiError::NotFound)
}

/// An empty body counts as `{}`.
fn parse_body(body: &Bytes) -> Result<Value, ApiError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_slice(body).map_err(|e| ApiError::BadRequest(format!("Invalid JSON: {}", e)))
}

pub async fn list_comics(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<Record>>, ApiError> {
    let records = state.repo().list(query.ciudad.as_deref()).await?;
    Ok(Json(records))
}

pub async fn get_comic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Record>, ApiError> {
    let id = parse_id(&id)?;
    state
        .repo()
        .get(id)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn create_comic(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<Record>), ApiError> {
    let candidate = parse_body(&body)?;
    let record = state.repo().create(&candidate, CREATE_MODE).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update_comic(
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Bytes,
) -> Result<Json<Record>, ApiError> {
    let patch = parse_body(&body)?;
    let id = parse_id(&id);
    // Validation runs before the lookup, so a bad patch is a 400 even for
    // ids that cannot exist.
    let id = match id {
        Ok(id) => id,
        Err(not_found) => {
            state.repo().validator().validate_patch(&patch, UPDATE_MODE)?;
            return Err(not_found);
        }
    };
    state
        .repo()
        .update(id, &patch, UPDATE_MODE)
        .await?
        .map(Json)
        .ok_or(ApiError::NotFound)
}

pub async fn delete_comic(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if let Ok(id) = parse_id(&id) {
        state.repo().delete(id).await?;
    } else {
        debug!(id = %id, "Ignoring delete of unparseable id");
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn stamp_comics(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    state.repo().stamp_updated_at().await?;
    Ok((StatusCode::OK, "Registros actualizados exitosamente"))
}

/// The collection is read on the async side; layout and encoding run on
/// the blocking pool.
pub async fn generate_pdf(State(state): State<AppState>) -> Result<impl IntoResponse, ApiError> {
    let records = state.repo().list(None).await?;

    let renderer = state.clone();
    let document = tokio::task::spawn_blocking(move || -> Result<Vec<u8>, ReportError> {
        let mut document = Vec::new();
        renderer.exporter().export(
            renderer.template(),
            &mut records.into_iter(),
            &mut document,
        )?;
        Ok(document)
    })
    .await
    .map_err(|e| ReportError::Render {
        message: e.to_string(),
    })
    .and_then(|rendered| rendered)
    .map_err(Error::from)?;

    debug!(bytes = document.len(), "Rendered report");

    let exporter = state.exporter();
    let headers = [
        (header::CONTENT_TYPE, exporter.content_type().to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename={}", exporter.file_name()),
        ),
    ];
    Ok((headers, document))
}

pub async fn fallback() -> ApiError {
    ApiError::NotFound
}
