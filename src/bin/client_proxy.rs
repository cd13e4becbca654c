// src/bin/client_proxy.rs

use productos_apirest::infra::config;
use productos_apirest::proxy::{self, ApiClient, ProxyState};
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let base_url = config::api_base_url();
    info!(upstream = %base_url, "client proxy forwarding to product API");
    let api = Arc::new(ApiClient::new(base_url));
    let app = proxy::create_router(ProxyState { api });

    let addr = format!("0.0.0.0:{}", config::proxy_port());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("client proxy listening on http://{}", addr);
    axum::serve(listener, app).await?;

    Ok(())
}
