//! Product Model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::pricing;

/// Product entity
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub nombre: String,
    /// Legacy list price, still sent by some endpoints
    #[serde(default, deserialize_with = "super::de::opt_f64_lenient")]
    pub precio: Option<f64>,
    /// Price before taxes
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub precio_base: f64,
    /// IVA in percentage (e.g., 19 = 19%)
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub iva: f64,
    /// IPO surcharge as a fixed amount
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub ipo: f64,
    #[serde(default, deserialize_with = "super::de::opt_f64_lenient")]
    pub precio_venta: Option<f64>,
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub costo: f64,
    #[serde(default)]
    pub categoria: Option<String>,
    #[serde(default)]
    pub subcategoria: Option<String>,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(default)]
    pub imagen_url: Option<String>,
    /// Units per warehouse id
    #[serde(default, deserialize_with = "super::de::stock_map_lenient")]
    pub stocks: BTreeMap<i64, i64>,
}

impl Product {
    /// Units held in a warehouse (0 when the warehouse has no entry)
    pub fn stock_in(&self, warehouse_id: i64) -> i64 {
        self.stocks.get(&warehouse_id).copied().unwrap_or(0)
    }

    /// Sale price: the server's figure when present, otherwise computed
    pub fn sale_price(&self) -> f64 {
        self.precio_venta
            .unwrap_or_else(|| pricing::sale_price(self.precio_base, self.iva, self.ipo))
    }
}

/// Create / update product payload (sent as multipart form fields)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProductInput {
    pub nombre: String,
    pub precio_base: f64,
    pub iva: f64,
    pub ipo: f64,
    pub costo: f64,
    pub categoria: String,
    pub subcategoria: Option<String>,
    pub descripcion: Option<String>,
}

impl ProductInput {
    /// Text fields of the multipart body, in submission order
    ///
    /// `precio` carries the computed sale price for endpoints that still
    /// read the legacy field.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("nombre", self.nombre.clone()),
            (
                "precio",
                pricing::sale_price(self.precio_base, self.iva, self.ipo).to_string(),
            ),
            ("precio_base", self.precio_base.to_string()),
            ("iva", self.iva.to_string()),
            ("ipo", self.ipo.to_string()),
            ("costo", self.costo.to_string()),
            ("categoria", self.categoria.clone()),
            ("descripcion", self.descripcion.clone().unwrap_or_default()),
        ];
        if let Some(sub) = &self.subcategoria {
            fields.push(("subcategoria", sub.clone()));
        }
        fields
    }
}
