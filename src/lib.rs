pub mod app;
pub mod domain;
pub mod infra;
pub mod proxy;
pub mod storage;
pub mod transport;

// Convenience re-exports (keeps call-sites clean)
pub use app::catalog_service::CatalogService;
pub use domain::model::{Categoria, FieldViolation, Producto};
pub use storage::blob::{BlobError, BlobStore};
pub use storage::document::{Document, DocumentStore, StoreError};
