//! The client proxy: the same catalog surface re-exposed by forwarding every
//! call to the product API over HTTP.

pub mod client;
pub mod handlers;
pub mod router;

pub use client::{ApiClient, ClientError};
pub use handlers::ProxyState;
pub use router::create_router;
