//! Category and Subcategory Models

use serde::{Deserialize, Serialize};

/// Product category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub nombre: String,
}

/// Product subcategory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subcategory {
    pub id: i64,
    pub nombre: String,
}

/// Create / rename payload, shared by categories, subcategories and warehouses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NamePayload {
    pub nombre: String,
}

impl NamePayload {
    /// Trimmed name, `None` when blank
    pub fn new(nombre: &str) -> Option<Self> {
        let nombre = nombre.trim();
        (!nombre.is_empty()).then(|| Self {
            nombre: nombre.to_string(),
        })
    }
}
