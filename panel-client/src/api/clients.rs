//! Clients (clientes): paginated listing, create/update with RUT, bulk
//! import, statistics

use serde::Serialize;
use shared::clients::{self, ClientRow};
use shared::error::AppError;
use shared::models::{BulkImportResult, Client, ClientInput, ClientPage, ClientSaveResponse, ClientStats};

use crate::http::HttpClient;
use crate::upload::{MultipartBody, Upload};
use crate::{ClientResult, PanelClient};

#[derive(Serialize)]
struct PageQuery {
    page: u32,
    per_page: u32,
}

fn client_form(input: &ClientInput, establecimiento: &str, rut: Option<Upload>) -> ClientResult<MultipartBody> {
    if input.nombre.trim().is_empty() {
        return Err(AppError::required("nombre").into());
    }
    Ok(
        MultipartBody::from_fields(input.form_fields(establecimiento)).maybe_file(rut.map(|f| {
            Upload {
                field: "rut".into(),
                ..f
            }
        })),
    )
}

impl PanelClient {
    /// `GET /clientes?page=&per_page=` (pages start at 1)
    pub async fn list_clients(&self, page: u32, per_page: u32) -> ClientResult<ClientPage> {
        let query = PageQuery {
            page: page.max(1),
            per_page: per_page.max(1),
        };
        self.http().get_query("clientes", &query).await
    }

    /// `GET /clientes/estadisticas`
    pub async fn client_stats(&self) -> ClientResult<Vec<ClientStats>> {
        self.http().get("clientes/estadisticas").await
    }

    /// One page of clients with their statistics merged in
    pub async fn client_rows(&self, page: u32, per_page: u32) -> ClientResult<(Vec<ClientRow>, u64)> {
        let listing = self.list_clients(page, per_page).await?;
        let stats = self.client_stats().await?;
        Ok((clients::merge_stats(listing.clientes, &stats), listing.total))
    }

    /// `POST /cliente` (multipart, optional `rut` document)
    pub async fn create_client(&self, input: &ClientInput, rut: Option<Upload>) -> ClientResult<Client> {
        let establecimiento = self.establecimiento().await?;
        let body = client_form(input, &establecimiento, rut)?;
        let saved: ClientSaveResponse = self.http().post_multipart("cliente", &body).await?;
        let client = saved.merge(0, input, Some(establecimiento));
        tracing::info!(client_id = client.id, nombre = %client.nombre, "Client created");
        Ok(client)
    }

    /// `PUT /cliente/{id}` (multipart, optional `rut` document)
    pub async fn update_client(
        &self,
        id: i64,
        input: &ClientInput,
        rut: Option<Upload>,
    ) -> ClientResult<Client> {
        let establecimiento = self.establecimiento().await?;
        let body = client_form(input, &establecimiento, rut)?;
        let saved: ClientSaveResponse = self
            .http()
            .put_multipart(&format!("cliente/{}", id), &body)
            .await?;
        tracing::info!(client_id = id, "Client updated");
        Ok(saved.merge(id, input, Some(establecimiento)))
    }

    /// `POST /clientes/carga_masiva` (spreadsheet in field `archivo`)
    pub async fn import_clients(&self, file: Upload) -> ClientResult<BulkImportResult> {
        let body = MultipartBody::new().file(Upload {
            field: "archivo".into(),
            ..file
        });
        let result: BulkImportResult = self
            .http()
            .post_multipart("clientes/carga_masiva", &body)
            .await?;
        tracing::info!(
            created = result.creados.unwrap_or_default(),
            errors = result.errores.len(),
            "Client bulk import finished"
        );
        Ok(result)
    }
}
