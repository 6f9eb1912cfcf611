//! HTTP transport with bearer auth and a single-retry refresh
//!
//! Every request carries the session's access token when one is present.
//! When the backend answers 401 the client performs exactly one
//! `POST /refresh`, stores the new access token and replays the original
//! request once. A failed refresh clears the whole session and surfaces
//! [`ClientError::SessionExpired`]. A replayed request is never refreshed
//! again: a second 401 is returned as an error, [`ClientError::Api`] when
//! the body carries a code and [`ClientError::Unauthorized`] otherwise.
//! With no refresh token stored the refresh counts as failed.

use std::time::Duration;

use async_trait::async_trait;
use http::StatusCode;
use reqwest::{Client, RequestBuilder, Response};
use serde::Serialize;
use serde::de::DeserializeOwned;
use shared::error::{ErrorBody, ErrorCode};
use shared::models::{RefreshRequest, RefreshResponse};

use crate::session::Session;
use crate::upload::MultipartBody;
use crate::{ClientConfig, ClientError, ClientResult};

/// Path of the token refresh endpoint
pub const REFRESH_PATH: &str = "refresh";

/// Paths whose 401 means bad credentials, never an expired token
const NO_REFRESH_PATHS: &[&str] = &["login", REFRESH_PATH];

/// HTTP client trait
#[async_trait]
pub trait HttpClient: Send + Sync {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T>;
    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T>;
    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T>;
    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &MultipartBody,
    ) -> ClientResult<T>;
    async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &MultipartBody,
    ) -> ClientResult<T>;
}

/// Network HTTP client
#[derive(Debug, Clone)]
pub struct NetworkHttpClient {
    client: Client,
    base_url: String,
    session: Session,
}

impl NetworkHttpClient {
    pub fn new(config: &ClientConfig, session: Session) -> ClientResult<Self> {
        if !(config.base_url.starts_with("http://") || config.base_url.starts_with("https://")) {
            return Err(ClientError::Config(format!(
                "base URL must start with http:// or https://, got {:?}",
                config.base_url
            )));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;
        Ok(Self {
            client,
            base_url: config.normalized_base_url().to_string(),
            session,
        })
    }

    /// Base URL without trailing slash
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Send one attempt of a request with the given token
    async fn send<F>(&self, build: &F, url: &str, token: Option<&str>) -> ClientResult<Response>
    where
        F: Fn(&Client, &str) -> ClientResult<RequestBuilder> + Send + Sync,
    {
        let mut req = build(&self.client, url)?;
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        Ok(req.send().await?)
    }

    /// Run a request through the refresh interceptor
    async fn execute<T, F>(&self, path: &str, build: F) -> ClientResult<T>
    where
        T: DeserializeOwned,
        F: Fn(&Client, &str) -> ClientResult<RequestBuilder> + Send + Sync,
    {
        let url = self.url(path);
        let token = self.session.token().await;
        let response = self.send(&build, &url, token.as_deref()).await?;

        let path_key = path.trim_start_matches('/');
        if response.status() != StatusCode::UNAUTHORIZED
            || NO_REFRESH_PATHS.iter().any(|p| *p == path_key)
        {
            return handle_response(response).await;
        }

        tracing::debug!(path = %path_key, "Access token rejected, refreshing");
        let new_token = self.refresh().await?;

        // Replayed exactly once; a second 401 is returned as-is
        let retried = self.send(&build, &url, Some(&new_token)).await?;
        handle_response(retried).await
    }

    /// Exchange the refresh token for a new access token
    ///
    /// On any failure the session is cleared.
    async fn refresh(&self) -> ClientResult<String> {
        let Some(refresh_token) = self.session.refresh_token().await else {
            tracing::warn!("No refresh token in session, clearing session");
            self.session.clear().await;
            return Err(ClientError::SessionExpired);
        };

        let result: ClientResult<RefreshResponse> = async {
            let response = self
                .client
                .post(self.url(REFRESH_PATH))
                .json(&RefreshRequest { refresh_token })
                .send()
                .await?;
            handle_response(response).await
        }
        .await;

        match result {
            Ok(RefreshResponse { access_token }) => {
                self.session.set_access_token(access_token.clone()).await;
                tracing::info!("Access token refreshed");
                Ok(access_token)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Token refresh failed, clearing session");
                self.session.clear().await;
                Err(ClientError::SessionExpired)
            }
        }
    }
}

/// Map a response to the decoded body or a [`ClientError`]
async fn handle_response<T: DeserializeOwned>(response: Response) -> ClientResult<T> {
    let status = response.status();
    let text = response.text().await?;

    if !status.is_success() {
        return Err(error_from_body(status, &text));
    }

    // Empty bodies decode as JSON null (unit, Option, IgnoredAny)
    let payload = if text.trim().is_empty() { "null" } else { &text };
    serde_json::from_str(payload).map_err(|e| {
        tracing::debug!(status = %status, body = %text, "Undecodable response body");
        ClientError::InvalidResponse(e.to_string())
    })
}

fn error_from_body(status: StatusCode, text: &str) -> ClientError {
    let body = serde_json::from_str::<ErrorBody>(text).ok();

    // Structured body with a known code
    if let Some(code) = body
        .as_ref()
        .and_then(|b| b.code)
        .and_then(|c| ErrorCode::try_from(c).ok())
    {
        let err = body.unwrap_or_default().into_app_error(status);
        return ClientError::Api {
            status: status.as_u16(),
            code,
            message: err.message,
        };
    }

    let message = body
        .and_then(|b| b.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| text.to_string());

    match status {
        StatusCode::UNAUTHORIZED => ClientError::Unauthorized,
        StatusCode::FORBIDDEN => ClientError::Forbidden(message),
        StatusCode::NOT_FOUND => ClientError::NotFound(message),
        StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
            ClientError::Validation(message)
        }
        _ => ClientError::Internal(format!("{}: {}", status, message)),
    }
}

#[async_trait]
impl HttpClient for NetworkHttpClient {
    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(path, |c, url| Ok(c.get(url))).await
    }

    async fn get_query<T: DeserializeOwned, Q: Serialize + Sync>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        self.execute(path, |c, url| Ok(c.get(url).query(query))).await
    }

    async fn post<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(path, |c, url| Ok(c.post(url).json(body))).await
    }

    async fn put<T: DeserializeOwned, B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        self.execute(path, |c, url| Ok(c.put(url).json(body))).await
    }

    async fn delete<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        self.execute(path, |c, url| Ok(c.delete(url))).await
    }

    async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &MultipartBody,
    ) -> ClientResult<T> {
        self.execute(path, |c, url| Ok(c.post(url).multipart(body.to_form()?)))
            .await
    }

    async fn put_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &MultipartBody,
    ) -> ClientResult<T> {
        self.execute(path, |c, url| Ok(c.put(url).multipart(body.to_form()?)))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_from_structured_body() {
        let err = error_from_body(
            StatusCode::NOT_FOUND,
            r#"{"code": 7001, "message": "Bodega 3 no existe"}"#,
        );
        match err {
            ClientError::Api {
                status,
                code,
                message,
            } => {
                assert_eq!(status, 404);
                assert_eq!(code, ErrorCode::WarehouseNotFound);
                assert_eq!(message, "Bodega 3 no existe");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_error_from_plain_body() {
        assert!(matches!(
            error_from_body(StatusCode::BAD_REQUEST, r#"{"error": "Nombre requerido"}"#),
            ClientError::Validation(m) if m == "Nombre requerido"
        ));
        assert!(matches!(
            error_from_body(StatusCode::FORBIDDEN, "Contraseña incorrecta"),
            ClientError::Forbidden(m) if m == "Contraseña incorrecta"
        ));
        assert!(matches!(
            error_from_body(StatusCode::UNAUTHORIZED, ""),
            ClientError::Unauthorized
        ));
        assert!(matches!(
            error_from_body(StatusCode::BAD_GATEWAY, "upstream"),
            ClientError::Internal(_)
        ));
    }

    #[test]
    fn test_rejects_bad_base_url() {
        let err = NetworkHttpClient::new(&ClientConfig::new("localhost:5000"), Session::default())
            .unwrap_err();
        assert!(matches!(err, ClientError::Config(_)));
    }

    #[test]
    fn test_url_join() {
        let http =
            NetworkHttpClient::new(&ClientConfig::new("http://api.local/"), Session::default())
                .unwrap();
        assert_eq!(http.url("/pedidos"), "http://api.local/pedidos");
        assert_eq!(http.url("pedido/3/estado"), "http://api.local/pedido/3/estado");
    }
}
