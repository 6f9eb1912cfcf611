//! Orders (pedidos): listing, status, delivery, line edits, documents

use shared::error::Acknowledgement;
use shared::models::{
    Order, OrderLine, OrderLinesUpdate, OrderStatus, OrderStatusUpdate, UploadResponse,
};
use shared::{receivables, sales};

use super::Ignored;
use crate::http::HttpClient;
use crate::upload::{MultipartBody, Upload};
use crate::{ClientResult, PanelClient};

#[derive(serde::Serialize)]
struct NitQuery<'a> {
    cliente_nit: &'a str,
}

impl PanelClient {
    /// `GET /pedidos`
    pub async fn list_orders(&self) -> ClientResult<Vec<Order>> {
        let orders: Vec<Order> = self.http().get("pedidos").await?;
        tracing::debug!(count = orders.len(), "Fetched orders");
        Ok(orders)
    }

    /// `GET /pedidos_nit?cliente_nit=` orders of one client
    pub async fn orders_by_nit(&self, nit: &str) -> ClientResult<Vec<Order>> {
        self.http()
            .get_query("pedidos_nit", &NitQuery { cliente_nit: nit.trim() })
            .await
    }

    /// `GET /pedidos/comercial/{id}` orders taken by one commercial
    pub async fn commercial_orders(&self, commercial_id: i64) -> ClientResult<Vec<Order>> {
        self.http()
            .get(&format!("pedidos/comercial/{}", commercial_id))
            .await
    }

    /// `PUT /pedido/{id}/estado`
    pub async fn set_order_status(&self, order: &mut Order, status: OrderStatus) -> ClientResult<()> {
        let _: Ignored = self
            .http()
            .put(
                &format!("pedido/{}/estado", order.id),
                &OrderStatusUpdate { estado: status },
            )
            .await?;
        tracing::info!(order_id = order.id, estado = %status, "Order status updated");
        order.estado = status;
        Ok(())
    }

    /// `PUT /pedido/{id}/estado_entrega`; the responsible name is required
    ///
    /// Returns the backend's confirmation message, if any.
    pub async fn confirm_delivery(
        &self,
        order: &mut Order,
        responsible: &str,
    ) -> ClientResult<Option<String>> {
        let update = sales::delivery_confirmation(responsible)?;
        let ack: Option<Acknowledgement> = self
            .http()
            .put(&format!("pedido/{}/estado_entrega", order.id), &update)
            .await?;
        tracing::info!(order_id = order.id, responsable = %update.responsable, "Order delivered");
        sales::apply_delivery(order, &update);
        Ok(ack.and_then(|a| a.mensaje))
    }

    /// `PUT /pedido/{id}/productos`
    pub async fn update_order_lines(
        &self,
        order: &mut Order,
        lines: Vec<OrderLine>,
    ) -> ClientResult<()> {
        sales::validate_lines(&lines)?;
        let body = OrderLinesUpdate { productos: lines };
        let _: Ignored = self
            .http()
            .put(&format!("pedido/{}/productos", order.id), &body)
            .await?;
        order.productos = serde_json::to_string(&body.productos)?;
        tracing::info!(order_id = order.id, lines = body.productos.len(), "Order lines updated");
        Ok(())
    }

    /// `POST /pedido/{id}/cargar_factura`; the order becomes invoiced
    pub async fn upload_invoice(&self, order: &mut Order, file: Upload) -> ClientResult<UploadResponse> {
        let body = MultipartBody::new().file(Upload {
            field: "factura".into(),
            ..file
        });
        let response: UploadResponse = self
            .http()
            .post_multipart(&format!("pedido/{}/cargar_factura", order.id), &body)
            .await?;
        tracing::info!(order_id = order.id, "Invoice uploaded");
        receivables::apply_invoice(order, response.factura_url.clone());
        Ok(response)
    }

    /// `POST /pedido/{id}/cargar_recibo`; the invoice becomes paid
    pub async fn upload_receipt(&self, order: &mut Order, file: Upload) -> ClientResult<UploadResponse> {
        let body = MultipartBody::new().file(Upload {
            field: "recibo".into(),
            ..file
        });
        let response: UploadResponse = self
            .http()
            .post_multipart(&format!("pedido/{}/cargar_recibo", order.id), &body)
            .await?;
        tracing::info!(order_id = order.id, "Receipt uploaded");
        receivables::apply_receipt(order, response.recibo_url.clone());
        Ok(response)
    }
}
