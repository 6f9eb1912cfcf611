//! Inventory count and stock movement payloads

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};

/// Per-product entry of a count submission
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountEntry {
    pub cantidad: i64,
    /// `equal`, `greater` or `less`
    pub alerta: String,
    pub diferencia: i64,
}

/// `POST /inventarios/ejecutar` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountSubmission {
    pub bodega_id: i64,
    /// Entries keyed by product id
    pub inventario: BTreeMap<i64, CountEntry>,
    pub responsable: String,
}

/// One line of an executed count
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountDetail {
    #[serde(default)]
    pub producto_id: Option<i64>,
    #[serde(default)]
    pub producto_nombre: String,
    #[serde(default, deserialize_with = "super::de::i64_lenient")]
    pub cantidad_manual: i64,
    #[serde(default, deserialize_with = "super::de::i64_lenient")]
    pub cantidad_sistema: i64,
    #[serde(deserialize_with = "super::de::i64_lenient")]
    pub diferencia: i64,
}

/// Executed count record from `GET /inventarios/ejecutados`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountRecord {
    pub id: i64,
    #[serde(default)]
    pub bodega_id: Option<i64>,
    #[serde(default)]
    pub bodega_nombre: String,
    #[serde(default)]
    pub responsable: String,
    pub fecha_ejecucion: String,
    #[serde(default)]
    pub detalles: Vec<CountDetail>,
}

impl CountRecord {
    /// Signed sum of the detail differences
    pub fn total_difference(&self) -> i64 {
        self.detalles.iter().map(|d| d.diferencia).sum()
    }

    /// A record is OK when its differences cancel out to zero
    pub fn is_ok(&self) -> bool {
        self.total_difference() == 0
    }

    /// Execution date; accepts `YYYY-MM-DD HH:MM:SS`, RFC 3339 and bare dates
    pub fn executed_on(&self) -> Option<NaiveDate> {
        let raw = self.fecha_ejecucion.trim();
        chrono::DateTime::parse_from_rfc3339(raw)
            .map(|dt| dt.date_naive())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S").map(|dt| dt.date()))
            .or_else(|_| NaiveDate::parse_from_str(raw.get(..10).unwrap_or(raw), "%Y-%m-%d"))
            .ok()
    }
}

/// Kind of stock movement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MovementKind {
    /// Goods in: the warehouse is the destination
    Entrada,
    /// Goods out: the warehouse is the origin
    Salida,
    /// Transfer between two warehouses
    Traslado,
}

impl std::str::FromStr for MovementKind {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "entrada" => Ok(Self::Entrada),
            "salida" => Ok(Self::Salida),
            "traslado" => Ok(Self::Traslado),
            other => Err(AppError::with_message(
                ErrorCode::MovementTypeInvalid,
                format!("Unknown movement type: {}", other),
            )),
        }
    }
}

/// `POST /inventarios/movimiento` body
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockMovement {
    pub tipo: MovementKind,
    pub comentario: String,
    /// Units per product id
    pub cambios_stock: BTreeMap<i64, i64>,
    pub bodega_origen_id: Option<i64>,
    pub bodega_destino_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usuario: Option<String>,
}

impl StockMovement {
    /// Goods received into `warehouse_id`
    pub fn entrada(warehouse_id: i64, changes: BTreeMap<i64, i64>, comment: impl Into<String>) -> Self {
        Self {
            tipo: MovementKind::Entrada,
            comentario: comment.into(),
            cambios_stock: changes,
            bodega_origen_id: None,
            bodega_destino_id: Some(warehouse_id),
            usuario: None,
        }
    }

    /// Goods taken out of `warehouse_id`
    pub fn salida(warehouse_id: i64, changes: BTreeMap<i64, i64>, comment: impl Into<String>) -> Self {
        Self {
            tipo: MovementKind::Salida,
            comentario: comment.into(),
            cambios_stock: changes,
            bodega_origen_id: Some(warehouse_id),
            bodega_destino_id: None,
            usuario: None,
        }
    }

    pub fn traslado(
        from: i64,
        to: i64,
        changes: BTreeMap<i64, i64>,
        comment: impl Into<String>,
    ) -> Self {
        Self {
            tipo: MovementKind::Traslado,
            comentario: comment.into(),
            cambios_stock: changes,
            bodega_origen_id: Some(from),
            bodega_destino_id: Some(to),
            usuario: None,
        }
    }

    pub fn with_user(mut self, user: impl Into<String>) -> Self {
        self.usuario = Some(user.into());
        self
    }

    /// Reject empty movements, non-positive quantities and a transfer onto itself
    pub fn validate(&self) -> AppResult<()> {
        if self.cambios_stock.is_empty() {
            return Err(AppError::new(ErrorCode::MovementEmpty));
        }
        if let Some((product, qty)) = self.cambios_stock.iter().find(|(_, q)| **q <= 0) {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("Quantity for product {} must be positive, got {}", product, qty),
            ));
        }
        let (origin, destination) = (self.bodega_origen_id, self.bodega_destino_id);
        let ok = match self.tipo {
            MovementKind::Entrada => destination.is_some(),
            MovementKind::Salida => origin.is_some(),
            MovementKind::Traslado => matches!((origin, destination), (Some(a), Some(b)) if a != b),
        };
        if !ok {
            return Err(AppError::new(ErrorCode::WarehouseNotSelected)
                .with_detail("tipo", format!("{:?}", self.tipo).to_lowercase()));
        }
        Ok(())
    }
}

/// Response of `POST /inventarios/movimiento`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovementResponse {
    #[serde(default)]
    pub mensaje: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_wire_names() {
        let m = StockMovement::entrada(3, BTreeMap::from([(7, 12)]), "Compra proveedor");
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["tipo"], "entrada");
        assert_eq!(json["cambiosStock"]["7"], 12);
        assert_eq!(json["bodegaDestinoId"], 3);
        assert!(json["bodegaOrigenId"].is_null());
        assert!(json.get("usuario").is_none());
    }

    #[test]
    fn test_movement_validation() {
        assert!(StockMovement::salida(1, BTreeMap::from([(2, 1)]), "").validate().is_ok());
        assert_eq!(
            StockMovement::salida(1, BTreeMap::new(), "")
                .validate()
                .unwrap_err()
                .code,
            ErrorCode::MovementEmpty
        );
        assert_eq!(
            StockMovement::traslado(1, 1, BTreeMap::from([(2, 1)]), "")
                .validate()
                .unwrap_err()
                .code,
            ErrorCode::WarehouseNotSelected
        );
        assert_eq!(
            StockMovement::entrada(1, BTreeMap::from([(2, 0)]), "")
                .validate()
                .unwrap_err()
                .code,
            ErrorCode::ValueOutOfRange
        );
    }

    #[test]
    fn test_movement_kind_parse() {
        assert_eq!("Traslado".parse::<MovementKind>().unwrap(), MovementKind::Traslado);
        assert_eq!(
            "ajuste".parse::<MovementKind>().unwrap_err().code,
            ErrorCode::MovementTypeInvalid
        );
    }

    #[test]
    fn test_record_ok_and_date() {
        let r: CountRecord = serde_json::from_str(
            r#"{
                "id": 1,
                "bodega_nombre": "Principal",
                "responsable": "Luis",
                "fecha_ejecucion": "2024-06-01T10:00:00Z",
                "detalles": [{"producto_nombre": "A", "diferencia": 2}, {"producto_nombre": "B", "diferencia": -2}]
            }"#,
        )
        .unwrap();
        assert!(r.is_ok());
        assert_eq!(r.executed_on(), NaiveDate::from_ymd_opt(2024, 6, 1));
    }
}
