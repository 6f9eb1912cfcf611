//! Warehouse (bodega) Model

use serde::{Deserialize, Serialize};

/// Low-stock threshold used when the backend does not send one
pub const DEFAULT_LOW_STOCK_THRESHOLD: i64 = 10;

fn default_threshold() -> i64 {
    DEFAULT_LOW_STOCK_THRESHOLD
}

/// Storage location holding per-product stock
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warehouse {
    pub id: i64,
    pub nombre: String,
    /// Units at or below which a product counts as low stock
    #[serde(rename = "umbral_stock_bajo", default = "default_threshold")]
    pub low_stock_threshold: i64,
}

/// `POST /productos/{id}/stock` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUpdate {
    pub cantidad: i64,
    pub bodega_id: i64,
}

/// `POST /productos/{id}/stock` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockUpdateResponse {
    #[serde(deserialize_with = "super::de::i64_lenient")]
    pub stock: i64,
}
