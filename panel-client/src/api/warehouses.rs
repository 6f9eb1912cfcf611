//! Warehouses (bodegas)

use shared::error::{AppError, ErrorCode};
use shared::models::{NamePayload, Warehouse};

use crate::http::HttpClient;
use crate::{ClientResult, PanelClient};

impl PanelClient {
    /// `GET /bodegas`
    pub async fn list_warehouses(&self) -> ClientResult<Vec<Warehouse>> {
        self.http().get("bodegas").await
    }

    /// `POST /bodegas`; blank names are rejected locally
    pub async fn create_warehouse(&self, name: &str) -> ClientResult<Warehouse> {
        let payload =
            NamePayload::new(name).ok_or_else(|| AppError::new(ErrorCode::WarehouseNameRequired))?;
        let warehouse: Warehouse = self.http().post("bodegas", &payload).await?;
        tracing::info!(bodega_id = warehouse.id, nombre = %warehouse.nombre, "Warehouse created");
        Ok(warehouse)
    }
}
