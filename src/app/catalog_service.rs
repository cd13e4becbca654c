//! The catalog service.
//!
//! Thin façade over the product and category document stores. It only
//! delegates; the uniqueness-by-nombre rule and all response shaping live in
//! the HTTP handlers, and store failures propagate unchanged.

use crate::domain::model::{Categoria, Producto};
use crate::storage::document::{Document, DocumentStore, StoreError};
use chrono::Utc;
use futures::stream::BoxStream;
use std::sync::Arc;
use tracing::info;

pub struct CatalogService {
    productos: Arc<dyn DocumentStore<Producto>>,
    categorias: Arc<dyn DocumentStore<Categoria>>,
}

impl CatalogService {
    pub fn new(
        productos: Arc<dyn DocumentStore<Producto>>,
        categorias: Arc<dyn DocumentStore<Categoria>>,
    ) -> Self {
        Self {
            productos,
            categorias,
        }
    }

    pub fn find_all(&self) -> BoxStream<'static, Result<Producto, StoreError>> {
        self.productos.find_all()
    }

    pub async fn find_by_id(&self, id: &str) -> Result<Option<Producto>, StoreError> {
        self.productos.find_by_id(id).await
    }

    /// Exact, case-sensitive match on `nombre`.
    pub async fn find_by_nombre(&self, nombre: &str) -> Result<Option<Producto>, StoreError> {
        self.productos.find_first_by("nombre", nombre).await
    }

    pub async fn save(&self, producto: Producto) -> Result<Producto, StoreError> {
        self.productos.save(producto).await
    }

    /// No error when the product was already gone.
    pub async fn delete(&self, producto: &Producto) -> Result<(), StoreError> {
        match producto.id() {
            Some(id) => self.productos.delete(id).await,
            None => Ok(()),
        }
    }

    pub fn find_all_categorias(&self) -> BoxStream<'static, Result<Categoria, StoreError>> {
        self.categorias.find_all()
    }

    pub async fn find_categoria_by_id(&self, id: &str) -> Result<Option<Categoria>, StoreError> {
        self.categorias.find_by_id(id).await
    }

    pub async fn find_categoria_by_nombre(
        &self,
        nombre: &str,
    ) -> Result<Option<Categoria>, StoreError> {
        self.categorias.find_first_by("nombre", nombre).await
    }

    pub async fn save_categoria(&self, categoria: Categoria) -> Result<Categoria, StoreError> {
        self.categorias.save(categoria).await
    }

    /// Resets both collections and inserts the demo dataset: categorias C1-C4
    /// and productos "tv 1" through "tv 6".
    pub async fn seed_demo_data(&self) -> Result<(), StoreError> {
        self.productos.clear().await?;
        self.categorias.clear().await?;

        let mut categorias = Vec::new();
        for nombre in ["C1", "C2", "C3", "C4"] {
            let categoria = self.save_categoria(Categoria::new(nombre)).await?;
            info!(nombre = %categoria.nombre, "insert categoria");
            categorias.push(categoria);
        }

        let demo = [
            ("tv 1", 111.89, 0),
            ("tv 2", 222.89, 1),
            ("tv 3", 333.89, 2),
            ("tv 4", 444.89, 3),
            ("tv 5", 555.89, 0),
            ("tv 6", 666.89, 3),
        ];
        for (nombre, precio, categoria_idx) in demo {
            let mut producto = Producto::new(nombre, precio, categorias[categoria_idx].clone());
            producto.create_at = Some(Utc::now());
            let producto = self.save(producto).await?;
            info!(nombre = %producto.nombre, "insert producto");
        }
        Ok(())
    }
}
