//! Request logging middleware.
//!
//! Appends one line per request to the configured access log before the
//! request reaches its handler.

use std::collections::BTreeMap;
use std::net::SocketAddr;

use axum::body::Body;
use axum::extract::{ConnectInfo, Query, Request, State};
use axum::http::StatusCode;
use axum::http::request::Parts;
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tracing::warn;

use comics_file::AccessEntry;

use crate::state::AppState;

/// Largest request body buffered, matching axum's default body limit.
const BODY_LIMIT: usize = 2 * 1024 * 1024;

pub async fn log_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let Some(log) = state.access_log().cloned() else {
        return next.run(request).await;
    };

    let (parts, body) = request.into_parts();
    let buffered = axum::body::to_bytes(body, BODY_LIMIT).await;

    let entry = entry_for(&parts, buffered.as_deref().unwrap_or_default());
    match tokio::task::spawn_blocking(move || log.append(&entry)).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => warn!(error = %e, "Failed to append access log"),
        Err(e) => warn!(error = %e, "Access log task failed"),
    }

    match buffered {
        Ok(bytes) => next.run(Request::from_parts(parts, Body::from(bytes))).await,
        Err(e) => {
            warn!(error = %e, "Failed to buffer request body");
            (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large").into_response()
        }
    }
}

fn entry_for(parts: &Parts, body: &[u8]) -> AccessEntry {
    let url = parts
        .uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| parts.uri.path().to_string());

    let query = Query::<BTreeMap<String, String>>::try_from_uri(&parts.uri)
        .ok()
        .and_then(|Query(params)| serde_json::to_value(params).ok())
        .unwrap_or_else(empty_object);

    let body = serde_json::from_slice(body).unwrap_or_else(|_| empty_object());

    let client_ip = parts
        .extensions
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string())
        .unwrap_or_else(|| "-".to_string());

    AccessEntry {
        method: parts.method.to_string(),
        url,
        query,
        body,
        client_ip,
    }
}

fn empty_object() -> Value {
    Value::Object(Default::default())
}
