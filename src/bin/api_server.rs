// src/bin/api_server.rs

use productos_apirest::domain::model::{Categoria, Producto};
use productos_apirest::infra::config;
use productos_apirest::storage::blob::fs::FsBlobStore;
use productos_apirest::storage::document::postgres::PgDocumentStore;
use productos_apirest::transport;
use productos_apirest::CatalogService;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::info;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("connecting to the document store");
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&config::database_url())
        .await?;
    let productos = Arc::new(PgDocumentStore::<Producto>::new(pool.clone()).await?);
    let categorias = Arc::new(PgDocumentStore::<Categoria>::new(pool).await?);
    let service = Arc::new(CatalogService::new(productos, categorias));

    if config::seed_demo_data() {
        info!("seeding the demo catalog");
        service.seed_demo_data().await?;
    }

    let uploads_path = config::uploads_path();
    let uploads = Arc::new(FsBlobStore::new(&uploads_path).await?);
    info!(path = %uploads_path, "uploads directory ready");

    let app_state = transport::http::AppState { service, uploads };
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any);
    let app = transport::http::create_router(app_state)
        .merge(SwaggerUi::new("/swagger-ui").url(
            "/api-docs/openapi.json",
            transport::http::ApiDoc::openapi(),
        ))
        .layer(cors);

    let addr = format!("0.0.0.0:{}", config::api_port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("product API listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
