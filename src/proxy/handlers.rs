//! Proxy handlers: forward to the upstream API and translate the recognized
//! upstream failures into this process's own responses. Anything the
//! translation table does not recognize surfaces as a 500 for that request.

use crate::domain::model::Producto;
use crate::proxy::client::{ApiClient, ClientError};
use crate::transport::http::handlers::common::{bad_request, read_file_part};
use crate::transport::http::types::ErrorResponse;
use axum::extract::{Multipart, Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::warn;

pub const BASE_PATH: &str = "/api/client";

#[derive(Clone)]
pub struct ProxyState {
    pub api: Arc<ApiClient>,
}

/// Body returned when the upstream API reports a missing product.
#[derive(Serialize, Debug)]
pub struct NotFoundResponse {
    pub error: String,
    pub timestamp: DateTime<Utc>,
    pub server_status: u16,
}

/// Upstream 404 becomes this process's own 404 body; everything else is
/// surfaced, not swallowed.
fn upstream_error(err: ClientError) -> Response {
    match err {
        ClientError::Status { status: 404, .. } => (
            StatusCode::NOT_FOUND,
            Json(NotFoundResponse {
                error: "No existe el producto. Error: upstream responded 404".to_string(),
                timestamp: Utc::now(),
                server_status: 404,
            }),
        )
            .into_response(),
        other => {
            warn!(error = %other, "unhandled upstream failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: other.to_string(),
                }),
            )
                .into_response()
        }
    }
}

fn created_response(producto: &Producto) -> Response {
    let location = format!("{}/{}", BASE_PATH, producto.id.as_deref().unwrap_or(""));
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(producto),
    )
        .into_response()
}

pub async fn listar(State(state): State<ProxyState>) -> Response {
    match state.api.find_all().await {
        Ok(productos) => (StatusCode::OK, Json(productos)).into_response(),
        Err(e) => upstream_error(e),
    }
}

pub async fn ver(State(state): State<ProxyState>, Path(id): Path<String>) -> Response {
    match state.api.find_by_id(&id).await {
        Ok(producto) => (StatusCode::OK, Json(producto)).into_response(),
        Err(e) => upstream_error(e),
    }
}

pub async fn crear(State(state): State<ProxyState>, Json(mut producto): Json<Producto>) -> Response {
    if producto.create_at.is_none() {
        producto.create_at = Some(Utc::now());
    }
    match state.api.save(&producto).await {
        Ok(created) => created_response(&created),
        // A 400 from upstream is its aggregated validation list; echo it
        // verbatim as our own 400.
        Err(ClientError::Status { status: 400, body }) => (
            StatusCode::BAD_REQUEST,
            [(header::CONTENT_TYPE, "application/json")],
            body,
        )
            .into_response(),
        Err(e) => upstream_error(e),
    }
}

pub async fn editar(
    State(state): State<ProxyState>,
    Path(id): Path<String>,
    Json(producto): Json<Producto>,
) -> Response {
    match state.api.update(&producto, &id).await {
        Ok(updated) => created_response(&updated),
        Err(e) => upstream_error(e),
    }
}

pub async fn eliminar(State(state): State<ProxyState>, Path(id): Path<String>) -> Response {
    match state.api.delete(&id).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => upstream_error(e),
    }
}

pub async fn upload(
    State(state): State<ProxyState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let (filename, content) = match read_file_part(&mut multipart).await {
        Ok(Some(part)) => part,
        Ok(None) => return bad_request("missing multipart part 'file'"),
        Err(e) => return bad_request(e),
    };
    match state.api.upload(&id, &filename, content).await {
        Ok(producto) => created_response(&producto),
        Err(e) => upstream_error(e),
    }
}
