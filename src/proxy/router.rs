use crate::proxy::handlers::{self, ProxyState};
use axum::routing::{get, post};
use axum::Router;

pub fn create_router(state: ProxyState) -> Router {
    Router::new()
        .route("/api/client", get(handlers::listar).post(handlers::crear))
        .route("/api/client/upload/:id", post(handlers::upload))
        .route(
            "/api/client/:id",
            get(handlers::ver)
                .put(handlers::editar)
                .delete(handlers::eliminar),
        )
        .with_state(state)
}
