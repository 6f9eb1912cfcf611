//! Panel client
//!
//! [`PanelClient`] owns the transport and the session. Resource calls live
//! in the `api` modules as further `impl PanelClient` blocks.

use shared::error::{AppError, ErrorCode};
use shared::models::{LoginRequest, LoginResponse};

use crate::http::{HttpClient, NetworkHttpClient};
use crate::session::{Session, SessionData};
use crate::{ClientConfig, ClientError, ClientResult};

/// Typed client for the panel backend
///
/// Cheap to clone; clones share the session.
#[derive(Debug, Clone)]
pub struct PanelClient {
    http: NetworkHttpClient,
    session: Session,
}

impl PanelClient {
    /// Create a client; tokens present in the config seed the session
    pub fn new(config: &ClientConfig) -> ClientResult<Self> {
        let session = Session::new(SessionData {
            access_token: config.access_token.clone(),
            refresh_token: config.refresh_token.clone(),
            ..SessionData::default()
        });
        let http = NetworkHttpClient::new(config, session.clone())?;
        Ok(Self { http, session })
    }

    /// Create a client from `PANEL_*` environment variables
    pub fn from_env() -> ClientResult<Self> {
        Self::new(&ClientConfig::from_env())
    }

    pub fn http(&self) -> &NetworkHttpClient {
        &self.http
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Log in and populate the session
    ///
    /// A 401 from `/login` means bad credentials and is never refreshed.
    pub async fn login(&self, username: &str, password: &str) -> ClientResult<LoginResponse> {
        if username.trim().is_empty() {
            return Err(AppError::required("username").into());
        }
        if password.is_empty() {
            return Err(AppError::required("password").into());
        }

        let request = LoginRequest {
            username: username.trim().to_string(),
            password: password.to_string(),
        };
        let response: LoginResponse = self
            .http
            .post("login", &request)
            .await
            .map_err(|e| match e {
                ClientError::Unauthorized => AppError::new(ErrorCode::InvalidCredentials).into(),
                other => other,
            })?;

        self.session.set_login(response.clone()).await;
        tracing::info!(
            username = %request.username,
            establecimiento = response.establecimiento.as_deref().unwrap_or("-"),
            "Logged in"
        );
        Ok(response)
    }

    /// Drop both tokens and the branding (local only)
    pub async fn logout(&self) {
        self.session.clear().await;
        tracing::info!("Logged out");
    }

    pub async fn is_logged_in(&self) -> bool {
        self.session.is_authenticated().await
    }

    /// Establishment of the logged-in user, required by some create calls
    pub(crate) async fn establecimiento(&self) -> ClientResult<String> {
        self.session
            .establecimiento()
            .await
            .filter(|e| !e.trim().is_empty())
            .ok_or(ClientError::Unauthorized)
    }
}
