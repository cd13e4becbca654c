use crate::app::catalog_service::CatalogService;
use crate::storage::blob::BlobStore;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use utoipa::ToSchema;

#[derive(Clone)]
pub struct AppState {
    pub service: Arc<CatalogService>,
    pub uploads: Arc<dyn BlobStore>,
}

/// Soft-error payload returned with a 200 when a create collides on `nombre`.
#[derive(Serialize, Debug, ToSchema)]
pub struct DuplicateNombreResponse {
    pub errors: String,
    pub timestamp: DateTime<Utc>,
}

/// Generic error body for 4xx/5xx responses that carry a message.
#[derive(Serialize, Debug, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
