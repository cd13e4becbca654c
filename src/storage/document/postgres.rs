//! Document store adapter backed by PostgreSQL.
//!
//! Each collection maps to one table of shape `(id TEXT PRIMARY KEY,
//! doc JSONB NOT NULL)`; field queries go through the `->>` operator so the
//! documents keep their wire shape end to end.

use super::{Document, DocumentStore, StoreError};
use async_trait::async_trait;
use futures::stream::{self, BoxStream};
use futures::{StreamExt, TryStreamExt};
use serde_json::Value as JsonValue;
use sqlx::{PgPool, Row};
use std::marker::PhantomData;
use uuid::Uuid;

pub struct PgDocumentStore<T: Document> {
    pool: PgPool,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Document> PgDocumentStore<T> {
    /// Binds the store to `pool` and creates the collection table if it does
    /// not exist yet.
    pub async fn new(pool: PgPool) -> Result<Self, StoreError> {
        sqlx::query(&format!(
            "CREATE TABLE IF NOT EXISTS {} (id TEXT PRIMARY KEY, doc JSONB NOT NULL)",
            T::COLLECTION
        ))
        .execute(&pool)
        .await?;
        Ok(Self {
            pool,
            _marker: PhantomData,
        })
    }
}

fn decode_doc<T: Document>(row: &sqlx::postgres::PgRow) -> Result<T, StoreError> {
    let doc: JsonValue = row.try_get("doc")?;
    Ok(serde_json::from_value(doc)?)
}

#[async_trait]
impl<T: Document> DocumentStore<T> for PgDocumentStore<T> {
    fn find_all(&self) -> BoxStream<'static, Result<T, StoreError>> {
        let pool = self.pool.clone();
        let sql = format!("SELECT doc FROM {} ORDER BY id", T::COLLECTION);
        stream::once(async move {
            let rows = sqlx::query(&sql).fetch_all(&pool).await?;
            let mut docs = Vec::with_capacity(rows.len());
            for row in &rows {
                docs.push(decode_doc::<T>(row)?);
            }
            Ok::<_, StoreError>(stream::iter(docs.into_iter().map(Ok)))
        })
        .try_flatten()
        .boxed()
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<T>, StoreError> {
        let row = sqlx::query(&format!("SELECT doc FROM {} WHERE id = $1", T::COLLECTION))
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        row.as_ref().map(decode_doc).transpose()
    }

    async fn find_first_by(&self, field: &str, value: &str) -> Result<Option<T>, StoreError> {
        let row = sqlx::query(&format!(
            "SELECT doc FROM {} WHERE doc->>$1 = $2 LIMIT 1",
            T::COLLECTION
        ))
        .bind(field)
        .bind(value)
        .fetch_optional(&self.pool)
        .await?;
        row.as_ref().map(decode_doc).transpose()
    }

    async fn save(&self, mut doc: T) -> Result<T, StoreError> {
        let id = match doc.id() {
            Some(id) => id.to_string(),
            None => {
                let id = Uuid::new_v4().to_string();
                doc.set_id(id.clone());
                id
            }
        };
        let body = serde_json::to_value(&doc)?;
        sqlx::query(&format!(
            "INSERT INTO {} (id, doc) VALUES ($1, $2)
             ON CONFLICT (id) DO UPDATE SET doc = $2",
            T::COLLECTION
        ))
        .bind(&id)
        .bind(&body)
        .execute(&self.pool)
        .await?;
        Ok(doc)
    }

    async fn delete(&self, id: &str) -> Result<(), StoreError> {
        sqlx::query(&format!("DELETE FROM {} WHERE id = $1", T::COLLECTION))
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query(&format!("TRUNCATE TABLE {}", T::COLLECTION))
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
