//! Multipart upload handlers.
//!
//! Both flows follow the same strict sequencing: the photo bytes are fully
//! written to the blob store before the product record is saved, and the
//! record is saved before the response is emitted.

use crate::domain::model::{Categoria, Producto};
use crate::transport::http::handlers::common::{
    bad_request, foto_filename, internal_error, read_file_part,
};
use crate::transport::http::types::{AppState, ErrorResponse};
use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use tracing::info;

/// Attaches an uploaded photo to an existing product. A missing id is a 404
/// before anything touches the blob store.
#[utoipa::path(
    post,
    path = "/api/productos/upload/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Product with its new foto reference", body = Producto),
        (status = 404, description = "No product with that id"),
        (status = 400, description = "Missing or malformed file part", body = ErrorResponse)
    )
)]
pub async fn upload(
    State(state): State<AppState>,
    Path(id): Path<String>,
    mut multipart: Multipart,
) -> Response {
    let mut producto = match state.service.find_by_id(&id).await {
        Ok(Some(p)) => p,
        Ok(None) => return StatusCode::NOT_FOUND.into_response(),
        Err(e) => return internal_error(e),
    };

    let (filename, content) = match read_file_part(&mut multipart).await {
        Ok(Some(part)) => part,
        Ok(None) => return bad_request("missing multipart part 'file'"),
        Err(e) => return bad_request(e),
    };

    let foto = foto_filename(&filename);
    if let Err(e) = state.uploads.write(&foto, &content).await {
        return internal_error(e);
    }
    info!(%foto, bytes = content.len(), "stored uploaded photo");

    producto.foto = Some(foto);
    match state.service.save(producto).await {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(e) => internal_error(e),
    }
}

/// Creates a product and stores its photo from a single multipart request.
/// Form fields: `nombre`, `precio`, `categoria.id`, `categoria.nombre`, plus
/// the `file` part.
#[utoipa::path(
    post,
    path = "/api/productos/crear-con-foto",
    request_body(content = String, content_type = "multipart/form-data"),
    responses(
        (status = 200, description = "Created product with its foto reference", body = Producto),
        (status = 400, description = "Missing or malformed form data", body = ErrorResponse)
    )
)]
pub async fn crear_con_foto(State(state): State<AppState>, mut multipart: Multipart) -> Response {
    let mut nombre = None;
    let mut precio = None;
    let mut categoria_id = None;
    let mut categoria_nombre = None;
    let mut file: Option<(String, Vec<u8>)> = None;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => return bad_request(e),
        };
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let filename = field.file_name().unwrap_or("file").to_string();
            match field.bytes().await {
                Ok(content) => file = Some((filename, content.to_vec())),
                Err(e) => return bad_request(e),
            }
            continue;
        }
        let value = match field.text().await {
            Ok(value) => value,
            Err(e) => return bad_request(e),
        };
        match name.as_str() {
            "nombre" => nombre = Some(value),
            "precio" => precio = Some(value),
            "categoria.id" => categoria_id = Some(value),
            "categoria.nombre" => categoria_nombre = Some(value),
            _ => {}
        }
    }

    let Some(nombre) = nombre else {
        return bad_request("missing form field 'nombre'");
    };
    let precio: f64 = match precio.as_deref().map(str::parse) {
        Some(Ok(precio)) => precio,
        Some(Err(e)) => return bad_request(format!("invalid precio: {}", e)),
        None => return bad_request("missing form field 'precio'"),
    };
    let Some((filename, content)) = file else {
        return bad_request("missing multipart part 'file'");
    };

    let categoria = Categoria {
        id: categoria_id,
        nombre: categoria_nombre.unwrap_or_default(),
    };
    let mut producto = Producto::new(&nombre, precio, categoria);
    producto.create_at = Some(Utc::now());

    let foto = foto_filename(&filename);
    if let Err(e) = state.uploads.write(&foto, &content).await {
        return internal_error(e);
    }
    info!(%foto, bytes = content.len(), "stored uploaded photo");

    producto.foto = Some(foto);
    match state.service.save(producto).await {
        Ok(saved) => (StatusCode::OK, Json(saved)).into_response(),
        Err(e) => internal_error(e),
    }
}
