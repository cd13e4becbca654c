//! Centralized configuration (environment variables + defaults).

/// PostgreSQL connection string (required by the Postgres-backed server).
pub fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set")
}

/// Directory where uploaded product photos are stored.
pub fn uploads_path() -> String {
    std::env::var("UPLOADS_PATH").unwrap_or_else(|_| "uploads".to_string())
}

/// Listen port for the API server.
pub fn api_port() -> u16 {
    std::env::var("API_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(3000)
}

/// Listen port for the client proxy.
pub fn proxy_port() -> u16 {
    std::env::var("PROXY_PORT")
        .ok()
        .and_then(|v| v.parse::<u16>().ok())
        .unwrap_or(3001)
}

/// Base URL of the upstream product API, used by the client proxy.
pub fn api_base_url() -> String {
    std::env::var("API_BASE_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:3000/api/productos".to_string())
}

/// Reset and reinsert the demo catalog at startup when set to `true`.
pub fn seed_demo_data() -> bool {
    std::env::var("SEED_DEMO_DATA")
        .map(|v| v == "true")
        .unwrap_or(false)
}
