//! Commercial (sales representative) Model

use serde::{Deserialize, Serialize};

/// Member of the commercial team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Commercial {
    pub id: i64,
    pub nombre: String,
    /// Business-facing identifier, distinct from the row id
    #[serde(rename = "idComercial", default)]
    pub id_comercial: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
}

/// Create / update commercial payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CommercialInput {
    pub nombre: String,
    #[serde(rename = "idComercial")]
    pub id_comercial: String,
    pub ciudad: String,
    pub email: String,
    pub telefono: String,
}
