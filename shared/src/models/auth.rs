//! Authentication payloads

use serde::{Deserialize, Serialize};

/// `POST /login` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// `POST /login` response
///
/// Carries the establishment branding along with the token pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub refresh_token: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    #[serde(default)]
    pub establecimiento: Option<String>,
}

/// `POST /refresh` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// `POST /refresh` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefreshResponse {
    pub access_token: String,
}

/// `POST /gastos/{id}/aprobar` body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalRequest {
    pub password: String,
}
