//! Panel Client - typed HTTP client for the dashboard backend
//!
//! Bearer auth with a single-retry token refresh, JSON CRUD and multipart
//! uploads for orders, inventory, clients, expenses and catalog data.

pub mod api;
pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod session;
pub mod upload;

pub use client::PanelClient;
pub use config::ClientConfig;
pub use error::{ClientError, ClientResult};
pub use http::{HttpClient, NetworkHttpClient};
pub use session::{Session, SessionData};
pub use upload::{MultipartBody, Upload};

// Re-export shared types for convenience
pub use shared::error::{AppError, ErrorCode};
pub use shared::models;
