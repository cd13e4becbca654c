use crate::domain::model::Producto;
use crate::transport::http::types::ErrorResponse;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use uuid::Uuid;

/// Storage name for an uploaded file: `<random token>-<original name>` with
/// spaces, colons and backslashes stripped from the client-supplied part.
pub fn foto_filename(original: &str) -> String {
    let sanitized: String = original
        .chars()
        .filter(|c| !matches!(c, ' ' | ':' | '\\'))
        .collect();
    format!("{}-{}", Uuid::new_v4(), sanitized)
}

/// Pulls the `file` part out of a multipart body, returning its original
/// filename and content. `Ok(None)` when the request carries no such part.
pub async fn read_file_part(
    multipart: &mut Multipart,
) -> Result<Option<(String, Vec<u8>)>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() == Some("file") {
            let filename = field.file_name().unwrap_or("file").to_string();
            let content = field.bytes().await?.to_vec();
            return Ok(Some((filename, content)));
        }
    }
    Ok(None)
}

/// 201 with a `Location` pointing at the persisted product.
pub fn created_response(base_path: &str, producto: &Producto) -> Response {
    let location = format!("{}/{}", base_path, producto.id.as_deref().unwrap_or(""));
    (
        StatusCode::CREATED,
        [(header::LOCATION, location)],
        Json(producto),
    )
        .into_response()
}

pub fn bad_request(err: impl std::fmt::Display) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}

pub fn internal_error(err: impl std::fmt::Display) -> Response {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: err.to_string(),
        }),
    )
        .into_response()
}
