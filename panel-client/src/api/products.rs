//! Products: catalog CRUD and manual stock set

use shared::error::{AppError, ErrorCode};
use shared::inventory;
use shared::models::{Product, ProductInput, StockUpdate, StockUpdateResponse};

use super::Ignored;
use crate::http::HttpClient;
use crate::upload::{MultipartBody, Upload};
use crate::{ClientResult, PanelClient};

fn product_form(input: &ProductInput, image: Option<Upload>) -> ClientResult<MultipartBody> {
    if input.nombre.trim().is_empty() {
        return Err(AppError::required("nombre").into());
    }
    if !input.precio_base.is_finite() || input.precio_base < 0.0 {
        return Err(AppError::new(ErrorCode::ProductInvalidPrice)
            .with_detail("precio_base", input.precio_base)
            .into());
    }
    Ok(MultipartBody::from_fields(input.form_fields()).maybe_file(image.map(|f| Upload {
        field: "imagen".into(),
        ..f
    })))
}

impl PanelClient {
    /// `GET /productos`
    pub async fn list_products(&self) -> ClientResult<Vec<Product>> {
        self.http().get("productos").await
    }

    /// `POST /productos` (multipart, optional `imagen`)
    pub async fn create_product(
        &self,
        input: &ProductInput,
        image: Option<Upload>,
    ) -> ClientResult<Product> {
        let body = product_form(input, image)?;
        let product: Product = self.http().post_multipart("productos", &body).await?;
        tracing::info!(product_id = product.id, nombre = %product.nombre, "Product created");
        Ok(product)
    }

    /// `PUT /productos/{id}` (multipart, optional `imagen`)
    pub async fn update_product(
        &self,
        id: i64,
        input: &ProductInput,
        image: Option<Upload>,
    ) -> ClientResult<Product> {
        let body = product_form(input, image)?;
        let product = self
            .http()
            .put_multipart(&format!("productos/{}", id), &body)
            .await?;
        tracing::info!(product_id = id, "Product updated");
        Ok(product)
    }

    /// `DELETE /productos/{id}`
    pub async fn delete_product(&self, id: i64) -> ClientResult<()> {
        let _: Ignored = self.http().delete(&format!("productos/{}", id)).await?;
        tracing::info!(product_id = id, "Product deleted");
        Ok(())
    }

    /// `POST /productos/{id}/stock`; the returned figure is merged into `product`
    pub async fn set_stock(
        &self,
        product: &mut Product,
        warehouse_id: i64,
        quantity: i64,
    ) -> ClientResult<i64> {
        if quantity < 0 {
            return Err(AppError::with_message(
                ErrorCode::ValueOutOfRange,
                format!("Stock cannot be negative, got {}", quantity),
            )
            .into());
        }
        let response: StockUpdateResponse = self
            .http()
            .post(
                &format!("productos/{}/stock", product.id),
                &StockUpdate {
                    cantidad: quantity,
                    bodega_id: warehouse_id,
                },
            )
            .await?;
        tracing::info!(
            product_id = product.id,
            bodega_id = warehouse_id,
            stock = response.stock,
            "Stock set"
        );
        inventory::stock::apply_stock_update(product, warehouse_id, response.stock);
        Ok(response.stock)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_form_renames_image_field() {
        let input = ProductInput {
            nombre: "Aguardiente 750ml".into(),
            precio_base: 40000.0,
            iva: 19.0,
            ipo: 2500.0,
            costo: 30000.0,
            categoria: "Licores".into(),
            ..Default::default()
        };
        let image = Upload::from_bytes("file", "botella.jpg", vec![1, 2]).unwrap();
        let body = product_form(&input, Some(image)).unwrap();
        assert!(body.has_files());
        assert_eq!(body.field("precio"), Some("50100"));
        assert_eq!(body.field("categoria"), Some("Licores"));
    }

    #[test]
    fn test_product_form_rejects_negative_price() {
        let input = ProductInput {
            nombre: "X".into(),
            precio_base: -1.0,
            ..Default::default()
        };
        let err = product_form(&input, None).unwrap_err();
        assert_eq!(err.code(), ErrorCode::ProductInvalidPrice);
    }
}
