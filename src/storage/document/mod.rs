//! Generic document-store capability and its adapters.
//!
//! One capability interface parameterized by entity type, with one concrete
//! adapter per backing technology: [`postgres::PgDocumentStore`] persists each
//! collection as a `(id TEXT, doc JSONB)` table, [`memory::MemoryDocumentStore`]
//! keeps an in-process collection for tests and demos.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;
use futures::stream::BoxStream;
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Backend(#[from] sqlx::Error),
    #[error("document codec error: {0}")]
    Codec(#[from] serde_json::Error),
}

/// A persistable record with an opaque string id and a collection name.
pub trait Document:
    Serialize + DeserializeOwned + Clone + Send + Sync + Unpin + 'static
{
    const COLLECTION: &'static str;

    fn id(&self) -> Option<&str>;
    fn set_id(&mut self, id: String);
}

/// CRUD-by-id plus query-by-field over one collection of `T`.
///
/// Store failures propagate as [`StoreError`]; no translation happens at this
/// layer.
#[async_trait]
pub trait DocumentStore<T: Document>: Send + Sync {
    /// Every document in the collection, emitted one element at a time.
    fn find_all(&self) -> BoxStream<'static, Result<T, StoreError>>;

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError>;

    /// First document whose top-level `field` equals `value` exactly
    /// (case-sensitive).
    async fn find_first_by(&self, field: &str, value: &str) -> Result<Option<T>, StoreError>;

    /// Upsert. Assigns a fresh id when the document has none, and returns the
    /// persisted document with its id populated.
    async fn save(&self, doc: T) -> Result<T, StoreError>;

    /// Deleting an absent id is not an error.
    async fn delete(&self, id: &str) -> Result<(), StoreError>;

    /// Removes every document in the collection.
    async fn clear(&self) -> Result<(), StoreError>;
}
