//! Order (pedido) Model

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};

/// Timestamp format of `fecha_hora`
pub const ORDER_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Billing lifecycle of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OrderStatus {
    #[serde(rename = "Pedido Recibido")]
    Received,
    #[serde(rename = "Pedido Facturado")]
    Invoiced,
    #[serde(rename = "Factura Pagada")]
    Paid,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 3] = [Self::Received, Self::Invoiced, Self::Paid];

    /// Wire label
    pub fn label(&self) -> &'static str {
        match self {
            Self::Received => "Pedido Recibido",
            Self::Invoiced => "Pedido Facturado",
            Self::Paid => "Factura Pagada",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|s| s.label() == label)
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Dispatch state of an order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DeliveryStatus {
    #[default]
    #[serde(rename = "Pendiente")]
    Pending,
    #[serde(rename = "Entregado")]
    Delivered,
}

/// One product line inside an order's `productos` string
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    #[serde(deserialize_with = "super::de::i64_lenient")]
    pub id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(deserialize_with = "super::de::i64_lenient")]
    pub quantity: i64,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "super::de::opt_f64_lenient"
    )]
    pub price: Option<f64>,
}

/// Order entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    #[serde(default)]
    pub nombre_completo: String,
    #[serde(default)]
    pub numero_telefono: Option<String>,
    #[serde(default)]
    pub direccion: Option<String>,
    /// `YYYY-MM-DD HH:MM:SS`
    pub fecha_hora: String,
    /// JSON-encoded `[OrderLine]`; see [`Order::lines`]
    #[serde(default)]
    pub productos: String,
    pub estado: OrderStatus,
    #[serde(default)]
    pub estado_entrega: DeliveryStatus,
    #[serde(default)]
    pub responsable_entrega: Option<String>,
    #[serde(default, deserialize_with = "super::de::f64_lenient")]
    pub total_productos: f64,
    #[serde(default, deserialize_with = "super::de::opt_f64_lenient")]
    pub total_con_descuento: Option<f64>,
    #[serde(default)]
    pub comercial_id: Option<i64>,
    #[serde(default)]
    pub nit: Option<String>,
    /// Credit term in days
    #[serde(rename = "diasCartera", default, deserialize_with = "super::de::i64_lenient")]
    pub dias_cartera: i64,
    #[serde(default)]
    pub factura_url: Option<String>,
    #[serde(default)]
    pub recibo_url: Option<String>,
}

impl Order {
    /// Decode the product lines
    pub fn lines(&self) -> AppResult<Vec<OrderLine>> {
        if self.productos.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&self.productos).map_err(|e| {
            AppError::with_message(ErrorCode::OrderLinesInvalid, e.to_string())
                .with_detail("order_id", self.id)
        })
    }

    /// Sale total: the discounted total when present and non-zero
    pub fn sale_total(&self) -> f64 {
        match self.total_con_descuento {
            Some(t) if t != 0.0 => t,
            _ => self.total_productos,
        }
    }

    pub fn placed_at(&self) -> Option<NaiveDateTime> {
        NaiveDateTime::parse_from_str(&self.fecha_hora, ORDER_DATETIME_FORMAT).ok()
    }

    /// Calendar date of the order; tolerates a date-only `fecha_hora`
    pub fn date(&self) -> Option<NaiveDate> {
        self.placed_at().map(|dt| dt.date()).or_else(|| {
            let day = self.fecha_hora.split_whitespace().next()?;
            NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
        })
    }

    /// `YYYY-MM` of the order date
    pub fn month_key(&self) -> Option<String> {
        self.date().map(|d| d.format("%Y-%m").to_string())
    }
}

/// `PUT /pedido/{id}/estado` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderStatusUpdate {
    pub estado: OrderStatus,
}

/// `PUT /pedido/{id}/estado_entrega` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryUpdate {
    pub estado_entrega: DeliveryStatus,
    pub responsable: String,
}

/// `PUT /pedido/{id}/productos` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLinesUpdate {
    pub productos: Vec<OrderLine>,
}

/// Response of the invoice / receipt upload endpoints
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub factura_url: Option<String>,
    #[serde(default)]
    pub recibo_url: Option<String>,
    #[serde(default)]
    pub mensaje: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(json: &str) -> Order {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn test_deserialize_order() {
        let o = order(
            r#"{
                "id": 17,
                "nombre_completo": "Tienda La 14",
                "fecha_hora": "2024-03-05 14:22:10",
                "productos": "[{\"id\": 1, \"name\": \"Ron\", \"quantity\": 3, \"price\": 1200}]",
                "estado": "Pedido Facturado",
                "estado_entrega": "Entregado",
                "total_productos": 3600,
                "diasCartera": "30"
            }"#,
        );
        assert_eq!(o.estado, OrderStatus::Invoiced);
        assert_eq!(o.estado_entrega, DeliveryStatus::Delivered);
        assert_eq!(o.dias_cartera, 30);
        assert_eq!(o.date(), NaiveDate::from_ymd_opt(2024, 3, 5));
        assert_eq!(o.month_key().as_deref(), Some("2024-03"));

        let lines = o.lines().unwrap();
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].quantity, 3);
        assert_eq!(lines[0].price, Some(1200.0));
    }

    #[test]
    fn test_sale_total_prefers_discount() {
        let mut o = order(
            r#"{"id": 1, "fecha_hora": "2024-01-01 00:00:00", "estado": "Pedido Recibido", "total_productos": 100}"#,
        );
        assert_eq!(o.sale_total(), 100.0);
        o.total_con_descuento = Some(0.0);
        assert_eq!(o.sale_total(), 100.0);
        o.total_con_descuento = Some(90.0);
        assert_eq!(o.sale_total(), 90.0);
    }

    #[test]
    fn test_malformed_lines() {
        let o = order(
            r#"{"id": 9, "fecha_hora": "2024-01-01", "estado": "Pedido Recibido", "productos": "not json"}"#,
        );
        let err = o.lines().unwrap_err();
        assert_eq!(err.code, ErrorCode::OrderLinesInvalid);
        assert_eq!(o.date(), NaiveDate::from_ymd_opt(2024, 1, 1));
    }

    #[test]
    fn test_status_labels() {
        assert_eq!(
            OrderStatus::from_label("Factura Pagada"),
            Some(OrderStatus::Paid)
        );
        assert_eq!(OrderStatus::from_label("Anulado"), None);
        assert_eq!(
            serde_json::to_string(&OrderStatusUpdate {
                estado: OrderStatus::Invoiced
            })
            .unwrap(),
            r#"{"estado":"Pedido Facturado"}"#
        );
    }
}
