use crate::domain::model::{Categoria, Producto};
use crate::transport::http::handlers::{productos, upload};
use crate::transport::http::types::{AppState, DuplicateNombreResponse, ErrorResponse};
use axum::routing::{get, post};
use axum::Router;
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    paths(
        productos::listar,
        productos::listar_stream,
        productos::ver,
        productos::crear,
        productos::editar,
        productos::eliminar,
        upload::upload,
        upload::crear_con_foto
    ),
    components(schemas(Producto, Categoria, DuplicateNombreResponse, ErrorResponse))
)]
#[allow(dead_code)]
pub struct ApiDoc;

pub fn create_router(app_state: AppState) -> Router {
    Router::new()
        .route(
            "/api/productos",
            get(productos::listar).post(productos::crear),
        )
        .route("/api/productos/stream", get(productos::listar_stream))
        .route("/api/productos/crear-con-foto", post(upload::crear_con_foto))
        .route("/api/productos/upload/:id", post(upload::upload))
        .route(
            "/api/productos/:id",
            get(productos::ver)
                .put(productos::editar)
                .delete(productos::eliminar),
        )
        .with_state(app_state)
}
