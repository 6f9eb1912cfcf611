//! Authentication session store
//!
//! One session is shared by every clone of a client. The HTTP layer reads
//! the access token before each request and writes it back after a
//! refresh; login populates it and logout clears it.

use std::sync::Arc;

use shared::models::LoginResponse;
use tokio::sync::RwLock;

/// Session contents
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionData {
    /// Bearer token sent with every request
    pub access_token: Option<String>,
    /// Token exchanged for a new access token on 401
    pub refresh_token: Option<String>,
    /// Establishment branding
    pub logo_url: Option<String>,
    pub establecimiento: Option<String>,
}

impl SessionData {
    /// Creates a new empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store the token pair and branding after a successful login.
    pub fn set_login(&mut self, login: LoginResponse) {
        self.access_token = Some(login.access_token);
        self.refresh_token = Some(login.refresh_token);
        self.logo_url = login.logo_url;
        self.establecimiento = login.establecimiento;
    }

    /// Clears everything on logout or a failed refresh.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.access_token.is_some()
    }
}

/// Shared handle to the session
#[derive(Debug, Clone, Default)]
pub struct Session {
    inner: Arc<RwLock<SessionData>>,
}

impl Session {
    pub fn new(data: SessionData) -> Self {
        Self {
            inner: Arc::new(RwLock::new(data)),
        }
    }

    pub async fn snapshot(&self) -> SessionData {
        self.inner.read().await.clone()
    }

    pub async fn token(&self) -> Option<String> {
        self.inner.read().await.access_token.clone()
    }

    pub async fn refresh_token(&self) -> Option<String> {
        self.inner.read().await.refresh_token.clone()
    }

    pub async fn is_authenticated(&self) -> bool {
        self.inner.read().await.is_authenticated()
    }

    pub async fn establecimiento(&self) -> Option<String> {
        self.inner.read().await.establecimiento.clone()
    }

    pub async fn set_login(&self, login: LoginResponse) {
        self.inner.write().await.set_login(login);
    }

    /// Replace the access token, keeping the refresh token and branding
    pub async fn set_access_token(&self, token: String) {
        self.inner.write().await.access_token = Some(token);
    }

    pub async fn clear(&self) {
        self.inner.write().await.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn login() -> LoginResponse {
        LoginResponse {
            access_token: "a1".into(),
            refresh_token: "r1".into(),
            logo_url: Some("https://cdn/logo.png".into()),
            establecimiento: Some("Licorera Central".into()),
        }
    }

    #[tokio::test]
    async fn test_login_refresh_logout() {
        let session = Session::default();
        assert!(!session.is_authenticated().await);

        session.set_login(login()).await;
        let clone = session.clone();
        clone.set_access_token("a2".into()).await;

        let data = session.snapshot().await;
        assert_eq!(data.token(), Some("a2"));
        assert_eq!(data.refresh_token.as_deref(), Some("r1"));
        assert_eq!(data.establecimiento.as_deref(), Some("Licorera Central"));

        session.clear().await;
        assert_eq!(clone.snapshot().await, SessionData::new());
    }
}
