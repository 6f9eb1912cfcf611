//! Commercial team (comerciales)

use shared::error::AppError;
use shared::models::{Commercial, CommercialInput};

use super::Ignored;
use crate::http::HttpClient;
use crate::{ClientResult, PanelClient};

fn check(input: &CommercialInput) -> ClientResult<()> {
    if input.nombre.trim().is_empty() {
        return Err(AppError::required("nombre").into());
    }
    Ok(())
}

impl PanelClient {
    /// `GET /comerciales`
    pub async fn list_commercials(&self) -> ClientResult<Vec<Commercial>> {
        self.http().get("comerciales").await
    }

    /// `POST /comercial`
    pub async fn create_commercial(&self, input: &CommercialInput) -> ClientResult<Commercial> {
        check(input)?;
        let commercial: Commercial = self.http().post("comercial", input).await?;
        tracing::info!(commercial_id = commercial.id, "Commercial created");
        Ok(commercial)
    }

    /// `PUT /comercial/{id}`
    pub async fn update_commercial(&self, id: i64, input: &CommercialInput) -> ClientResult<Commercial> {
        check(input)?;
        self.http().put(&format!("comercial/{}", id), input).await
    }

    /// `DELETE /comercial/{id}`
    pub async fn delete_commercial(&self, id: i64) -> ClientResult<()> {
        let _: Ignored = self.http().delete(&format!("comercial/{}", id)).await?;
        tracing::info!(commercial_id = id, "Commercial deleted");
        Ok(())
    }
}
