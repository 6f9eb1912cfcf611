//! Categories and subcategories

use shared::error::{AppError, ErrorCode};
use shared::models::{Category, NamePayload, Subcategory};

use super::Ignored;
use crate::http::HttpClient;
use crate::{ClientResult, PanelClient};

fn name(nombre: &str) -> ClientResult<NamePayload> {
    NamePayload::new(nombre).ok_or_else(|| AppError::new(ErrorCode::CategoryNameRequired).into())
}

impl PanelClient {
    /// `GET /categorias`
    pub async fn list_categories(&self) -> ClientResult<Vec<Category>> {
        self.http().get("categorias").await
    }

    /// `POST /categorias`
    pub async fn create_category(&self, nombre: &str) -> ClientResult<Category> {
        let category: Category = self.http().post("categorias", &name(nombre)?).await?;
        tracing::info!(category_id = category.id, "Category created");
        Ok(category)
    }

    /// `PUT /categorias/{id}`
    pub async fn update_category(&self, id: i64, nombre: &str) -> ClientResult<Category> {
        self.http()
            .put(&format!("categorias/{}", id), &name(nombre)?)
            .await
    }

    /// `DELETE /categorias/{id}`
    pub async fn delete_category(&self, id: i64) -> ClientResult<()> {
        let _: Ignored = self.http().delete(&format!("categorias/{}", id)).await?;
        Ok(())
    }

    /// `GET /subcategorias`
    pub async fn list_subcategories(&self) -> ClientResult<Vec<Subcategory>> {
        self.http().get("subcategorias").await
    }

    /// `POST /subcategorias`
    pub async fn create_subcategory(&self, nombre: &str) -> ClientResult<Subcategory> {
        let sub: Subcategory = self.http().post("subcategorias", &name(nombre)?).await?;
        tracing::info!(subcategory_id = sub.id, "Subcategory created");
        Ok(sub)
    }

    /// `PUT /subcategorias/{id}`
    pub async fn update_subcategory(&self, id: i64, nombre: &str) -> ClientResult<Subcategory> {
        self.http()
            .put(&format!("subcategorias/{}", id), &name(nombre)?)
            .await
    }

    /// `DELETE /subcategorias/{id}`
    pub async fn delete_subcategory(&self, id: i64) -> ClientResult<()> {
        let _: Ignored = self.http().delete(&format!("subcategorias/{}", id)).await?;
        Ok(())
    }
}
