//! Client (cliente) Model

use serde::{Deserialize, Serialize};

/// Customer of the establishment
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Client {
    pub id: i64,
    pub nombre: String,
    #[serde(default)]
    pub razon_social: Option<String>,
    #[serde(default)]
    pub telefono: Option<String>,
    #[serde(default)]
    pub correo: Option<String>,
    #[serde(default)]
    pub nit: Option<String>,
    #[serde(rename = "diasCartera", default, deserialize_with = "super::de::i64_lenient")]
    pub dias_cartera: i64,
    #[serde(rename = "listaPreciosId", default)]
    pub lista_precios_id: Option<i64>,
    #[serde(default)]
    pub establecimiento: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    #[serde(default)]
    pub ciudad: Option<String>,
    #[serde(default)]
    pub tipo: Option<String>,
    #[serde(default)]
    pub rut_url: Option<String>,
}

/// One page of `GET /clientes`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientPage {
    #[serde(default)]
    pub clientes: Vec<Client>,
    #[serde(default)]
    pub total: u64,
}

/// Create / update client payload (multipart form fields)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientInput {
    pub nombre: String,
    pub razon_social: String,
    pub telefono: String,
    pub correo: String,
    pub nit: String,
    pub dias_cartera: i64,
    pub lista_precios_id: Option<i64>,
    pub direccion: String,
    pub ciudad: String,
    pub tipo: String,
}

impl ClientInput {
    /// Text fields of the multipart body
    ///
    /// `establecimiento` comes from the logged-in session, not the form.
    pub fn form_fields(&self, establecimiento: &str) -> Vec<(&'static str, String)> {
        vec![
            ("nombre", self.nombre.clone()),
            ("razon_social", self.razon_social.clone()),
            ("telefono", self.telefono.clone()),
            ("correo", self.correo.clone()),
            ("nit", self.nit.clone()),
            ("diasCartera", self.dias_cartera.to_string()),
            (
                "listaPreciosId",
                self.lista_precios_id
                    .map(|id| id.to_string())
                    .unwrap_or_default(),
            ),
            ("establecimiento", establecimiento.to_string()),
            ("direccion", self.direccion.clone()),
            ("ciudad", self.ciudad.clone()),
            ("tipo", self.tipo.clone()),
        ]
    }
}

/// Response of `POST /cliente` and `PUT /cliente/{id}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientSaveResponse {
    #[serde(default)]
    pub id: Option<i64>,
    /// Stored RUT document URL
    #[serde(default)]
    pub rut: Option<String>,
}

impl ClientSaveResponse {
    /// Local copy of the saved client
    pub fn merge(self, id: i64, input: &ClientInput, establecimiento: Option<String>) -> Client {
        Client {
            id: self.id.unwrap_or(id),
            nombre: input.nombre.clone(),
            razon_social: Some(input.razon_social.clone()),
            telefono: Some(input.telefono.clone()),
            correo: Some(input.correo.clone()),
            nit: Some(input.nit.clone()),
            dias_cartera: input.dias_cartera,
            lista_precios_id: input.lista_precios_id,
            establecimiento,
            direccion: Some(input.direccion.clone()),
            ciudad: Some(input.ciudad.clone()),
            tipo: Some(input.tipo.clone()),
            rut_url: self.rut,
        }
    }
}

/// Per-client figures from `GET /clientes/estadisticas`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ClientStats {
    pub cliente_id: i64,
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub total_gastado: f64,
    #[serde(default, deserialize_with = "super::de::opt_f64_lenient")]
    pub total_gastado_con_descuento: Option<f64>,
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub ticket_promedio: f64,
    #[serde(default, deserialize_with = "super::de::opt_f64_lenient")]
    pub ticket_promedio_con_descuento: Option<f64>,
}

impl ClientStats {
    /// Total spent, discounted figure preferred
    pub fn total_spent(&self) -> f64 {
        self.total_gastado_con_descuento.unwrap_or(self.total_gastado)
    }

    /// Average ticket, discounted figure preferred
    pub fn average_ticket(&self) -> f64 {
        self.ticket_promedio_con_descuento
            .unwrap_or(self.ticket_promedio)
    }
}

/// Response of `POST /clientes/carga_masiva`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BulkImportResult {
    #[serde(default)]
    pub mensaje: Option<String>,
    #[serde(default)]
    pub creados: Option<u64>,
    #[serde(default)]
    pub errores: Vec<String>,
}
