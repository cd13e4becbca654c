//! CRUD handlers for the product catalog.

use crate::domain::model::Producto;
use crate::transport::http::handlers::common::{created_response, internal_error};
use crate::transport::http::types::{AppState, DuplicateNombreResponse, ErrorResponse};
use axum::body::Body;
use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use futures::{StreamExt, TryStreamExt};
use tracing::info;

pub const BASE_PATH: &str = "/api/productos";

/// Collect-then-send listing variant: one JSON array in a single body.
#[utoipa::path(
    get,
    path = "/api/productos",
    responses(
        (status = 200, description = "All products as one JSON array", body = [Producto]),
        (status = 500, description = "Store failure", body = ErrorResponse)
    )
)]
pub async fn listar(State(state): State<AppState>) -> Response {
    match state.service.find_all().try_collect::<Vec<_>>().await {
        Ok(productos) => (StatusCode::OK, Json(productos)).into_response(),
        Err(e) => internal_error(e),
    }
}

/// Streaming listing variant: newline-delimited JSON, one product per chunk,
/// emitted to the transport as each element arrives.
#[utoipa::path(
    get,
    path = "/api/productos/stream",
    responses(
        (status = 200, description = "All products, one JSON document per line")
    )
)]
pub async fn listar_stream(State(state): State<AppState>) -> Response {
    let lines = state.service.find_all().map(|item| {
        let producto = item?;
        let mut line = serde_json::to_vec(&producto)?;
        line.push(b'\n');
        Ok::<_, axum::BoxError>(line)
    });
    (
        [(header::CONTENT_TYPE, "application/x-ndjson")],
        Body::from_stream(lines),
    )
        .into_response()
}

#[utoipa::path(
    get,
    path = "/api/productos/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product found", body = Producto),
        (status = 404, description = "No product with that id")
    )
)]
pub async fn ver(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.service.find_by_id(&id).await {
        Ok(Some(producto)) => (StatusCode::OK, Json(producto)).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => internal_error(e),
    }
}

#[utoipa::path(
    post,
    path = "/api/productos",
    request_body = Producto,
    responses(
        (status = 201, description = "Created; Location holds the new resource path", body = Producto),
        (status = 400, description = "Field validation failed; body lists every violation", body = [String]),
        (status = 200, description = "A product with that nombre already exists", body = DuplicateNombreResponse)
    )
)]
pub async fn crear(State(state): State<AppState>, Json(mut producto): Json<Producto>) -> Response {
    let violations = producto.validate();
    if !violations.is_empty() {
        let messages: Vec<String> = violations
            .iter()
            .map(|v| format!("El campo {} {}", v.field, v.message))
            .collect();
        return (StatusCode::BAD_REQUEST, Json(messages)).into_response();
    }

    if producto.create_at.is_none() {
        producto.create_at = Some(Utc::now());
    }

    match state.service.find_by_nombre(&producto.nombre).await {
        Ok(Some(existing)) => {
            info!(nombre = %existing.nombre, "create rejected, nombre already taken");
            (
                StatusCode::OK,
                Json(DuplicateNombreResponse {
                    errors: "Producto ya existe".to_string(),
                    timestamp: Utc::now(),
                }),
            )
                .into_response()
        }
        Ok(None) => match state.service.save(producto).await {
            Ok(saved) => created_response(BASE_PATH, &saved),
            Err(e) => internal_error(e),
        },
        Err(e) => internal_error(e),
    }
}

/// Overwrites nombre, precio, createAt and categoria on the stored product;
/// foto is left untouched.
#[utoipa::path(
    put,
    path = "/api/productos/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = Producto,
    responses(
        (status = 201, description = "Updated product", body = Producto),
        (status = 404, description = "No product with that id")
    )
)]
pub async fn editar(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(producto): Json<Producto>,
) -> Response {
    match state.service.find_by_id(&id).await {
        Ok(Some(mut existing)) => {
            existing.nombre = producto.nombre;
            existing.precio = producto.precio;
            existing.create_at = producto.create_at;
            existing.categoria = producto.categoria;
            match state.service.save(existing).await {
                Ok(saved) => created_response(BASE_PATH, &saved),
                Err(e) => internal_error(e),
            }
        }
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => internal_error(e),
    }
}

#[utoipa::path(
    delete,
    path = "/api/productos/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 204, description = "Deleted"),
        (status = 404, description = "No product with that id")
    )
)]
pub async fn eliminar(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    match state.service.find_by_id(&id).await {
        Ok(Some(producto)) => match state.service.delete(&producto).await {
            Ok(()) => StatusCode::NO_CONTENT.into_response(),
            Err(e) => internal_error(e),
        },
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => internal_error(e),
    }
}
