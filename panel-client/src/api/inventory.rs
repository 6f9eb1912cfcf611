//! Inventory counts and stock movements

use shared::inventory::Reconciliation;
use shared::models::{CountRecord, MovementResponse, StockMovement};

use super::Ignored;
use crate::http::HttpClient;
use crate::{ClientResult, PanelClient};

impl PanelClient {
    /// `GET /inventarios/ejecutados`
    pub async fn count_records(&self) -> ClientResult<Vec<CountRecord>> {
        self.http().get("inventarios/ejecutados").await
    }

    /// `POST /inventarios/ejecutar`
    ///
    /// Sent once; the submission guard of [`Reconciliation`] must pass
    /// first, otherwise nothing is sent.
    pub async fn submit_count(&self, count: &Reconciliation) -> ClientResult<()> {
        let submission = count.submission()?;
        let result: ClientResult<Ignored> =
            self.http().post("inventarios/ejecutar", &submission).await;
        match result {
            Ok(_) => {
                tracing::info!(
                    bodega_id = submission.bodega_id,
                    products = submission.inventario.len(),
                    total_difference = count.total_difference(),
                    "Inventory count submitted"
                );
                Ok(())
            }
            Err(e) => {
                tracing::error!(bodega_id = submission.bodega_id, error = %e, "Inventory count failed");
                Err(e)
            }
        }
    }

    /// `POST /inventarios/movimiento`
    pub async fn record_movement(&self, movement: &StockMovement) -> ClientResult<MovementResponse> {
        movement.validate()?;
        let response: MovementResponse = self
            .http()
            .post("inventarios/movimiento", movement)
            .await?;
        tracing::info!(
            tipo = ?movement.tipo,
            products = movement.cambios_stock.len(),
            "Stock movement recorded"
        );
        Ok(response)
    }
}
