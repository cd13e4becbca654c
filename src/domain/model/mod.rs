//! Catalog documents and their field validation.

use crate::storage::document::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// A catalog product.
///
/// `id` is absent until the document store assigns one on first save. `foto`
/// holds the generated storage filename of the uploaded photo, if any.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Producto {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub nombre: String,
    pub precio: Option<f64>,
    #[serde(rename = "createAt", skip_serializing_if = "Option::is_none")]
    pub create_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub categoria: Option<Categoria>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub foto: Option<String>,
}

/// A product category. Referenced by [`Producto`], not owned: many products
/// may point at the same category.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Categoria {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default)]
    pub nombre: String,
}

/// One failing field constraint. Transient: produced by [`Producto::validate`],
/// aggregated into the 400 response body, never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: &'static str,
}

impl Producto {
    pub fn new(nombre: &str, precio: f64, categoria: Categoria) -> Self {
        Self {
            id: None,
            nombre: nombre.to_string(),
            precio: Some(precio),
            create_at: None,
            categoria: Some(categoria),
            foto: None,
        }
    }

    /// Checks every field constraint and returns all violations at once, so a
    /// create request with several bad fields gets one aggregated response
    /// instead of failing on the first.
    pub fn validate(&self) -> Vec<FieldViolation> {
        let mut violations = Vec::new();
        if self.nombre.is_empty() {
            violations.push(FieldViolation {
                field: "nombre",
                message: "must not be empty",
            });
        }
        if self.precio.is_none() {
            violations.push(FieldViolation {
                field: "precio",
                message: "must not be null",
            });
        }
        violations
    }
}

impl Categoria {
    pub fn new(nombre: &str) -> Self {
        Self {
            id: None,
            nombre: nombre.to_string(),
        }
    }
}

impl Document for Producto {
    const COLLECTION: &'static str = "productos";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

impl Document for Categoria {
    const COLLECTION: &'static str = "categorias";

    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}
