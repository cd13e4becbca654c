//! In-process document store adapter.
//!
//! Same contract as the Postgres adapter over a locked in-memory collection.
//! Used by the integration tests, where each test gets its own isolated
//! catalog without a database.

use super::{Document, DocumentStore, StoreError};
use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

pub struct MemoryDocumentStore<T: Document> {
    docs: Arc<RwLock<Vec<T>>>,
}

impl<T: Document> MemoryDocumentStore<T> {
    pub fn new() -> Self {
        Self {
            docs: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T: Document> Default for MemoryDocumentStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Document> DocumentStore<T> for MemoryDocumentStore<T> {
    fn find_all(&self) -> BoxStream<'static, Result<T, StoreError>> {
        let docs = self.docs.clone();
        stream::once(async move {
            let snapshot = docs.read().await.clone();
            Ok::<_, StoreError>(stream::iter(snapshot.into_iter().map(Ok)))
        })
        .try_flatten()
        .boxed()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let docs = self.docs.read().await;
        Ok(docs.iter().find(|d| d.id() == Some(id)).cloned())
    }

    async fn find_first_by(&self, field: &str, value: &str) -> Result<Option<T>, StoreError> {
        let docs = self.docs.read().await;
        for doc in docs.iter() {
            let body = serde_json::to_value(doc)?;
            if body.get(field).and_then(|v| v.as_str()) == Some(value) {
                return Ok(Some(doc.clone()));
            }
        }
        Ok(None)
    }

    async fn save(&self, mut doc: T) -> Result<T, StoreError> {
        if doc.id().is_none() {
            doc.set_id(Uuid::new_v4().to_string());
        }
        let mut docs = self.docs.write().await;
        match docs.iter_mut().find(|d| d.id() == doc.id()) {
            Some(existing) => *existing = doc.clone(),
            None => docs.push(doc.clone()),
        }
        Ok(doc)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut docs = self.docs.write().await;
        docs.retain(|d| d.id() != Some(id));
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.docs.write().await.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Categoria, Producto};
    use futures::TryStreamExt;

    #[tokio::test]
    async fn save_assigns_an_id_once() {
        let store = MemoryDocumentStore::<Producto>::new();
        let saved = store
            .save(Producto::new("tv 1", 111.89, Categoria::new("C1")))
            .await
            .unwrap();
        let id = saved.id.clone().unwrap();
        assert!(!id.is_empty());

        let resaved = store.save(saved).await.unwrap();
        assert_eq!(resaved.id.as_deref(), Some(id.as_str()));
        let all: Vec<_> = store.find_all().try_collect().await.unwrap();
        assert_eq!(all.len(), 1);
    }

    #[tokio::test]
    async fn find_first_by_matches_exactly() {
        let store = MemoryDocumentStore::<Producto>::new();
        store
            .save(Producto::new("tv 1", 111.89, Categoria::new("C1")))
            .await
            .unwrap();

        let hit = store.find_first_by("nombre", "tv 1").await.unwrap();
        assert!(hit.is_some());
        assert!(store.find_first_by("nombre", "TV 1").await.unwrap().is_none());
        assert!(store.find_first_by("nombre", "tv").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_is_idempotent() {
        let store = MemoryDocumentStore::<Producto>::new();
        let saved = store
            .save(Producto::new("tv 1", 111.89, Categoria::new("C1")))
            .await
            .unwrap();
        let id = saved.id.unwrap();

        store.delete(&id).await.unwrap();
        store.delete(&id).await.unwrap();
        assert!(store.find_by_id(&id).await.unwrap().is_none());
    }
}
