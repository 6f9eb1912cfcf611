//! Price lists (listas de precios)

use shared::models::{PriceList, PriceListInput};

use super::Ignored;
use crate::http::HttpClient;
use crate::{ClientResult, PanelClient};

impl PanelClient {
    /// `GET /listasprecios`
    pub async fn list_price_lists(&self) -> ClientResult<Vec<PriceList>> {
        self.http().get("listasprecios").await
    }

    /// `POST /listasprecios`; the establishment comes from the session
    pub async fn create_price_list(&self, nombre: &str, descuento: f64) -> ClientResult<PriceList> {
        let input = self.price_list_input(nombre, descuento).await?;
        let list: PriceList = self.http().post("listasprecios", &input).await?;
        tracing::info!(price_list_id = list.id, descuento = list.descuento, "Price list created");
        Ok(list)
    }

    /// `PUT /listasprecios/{id}`
    pub async fn update_price_list(
        &self,
        id: i64,
        nombre: &str,
        descuento: f64,
    ) -> ClientResult<PriceList> {
        let input = self.price_list_input(nombre, descuento).await?;
        self.http()
            .put(&format!("listasprecios/{}", id), &input)
            .await
    }

    /// `DELETE /listasprecios/{id}`
    pub async fn delete_price_list(&self, id: i64) -> ClientResult<()> {
        let _: Ignored = self.http().delete(&format!("listasprecios/{}", id)).await?;
        tracing::info!(price_list_id = id, "Price list deleted");
        Ok(())
    }

    async fn price_list_input(&self, nombre: &str, descuento: f64) -> ClientResult<PriceListInput> {
        let input = PriceListInput {
            nombre: nombre.trim().to_string(),
            descuento,
            establecimiento: self.session().establecimiento().await,
        };
        input.validate()?;
        Ok(input)
    }
}
