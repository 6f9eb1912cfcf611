//! Shared types for the panel workspace
//!
//! Entity models mirroring the backend's JSON, error codes, money helpers
//! and the pure calculations behind each dashboard screen (inventory
//! reconciliation, stock overview, pricing, receivables, sales, expenses).

pub mod clients;
pub mod error;
pub mod expenses;
pub mod inventory;
pub mod models;
pub mod money;
pub mod pricing;
pub mod receivables;
pub mod sales;

// Re-exports
pub use error::{AppError, AppResult, ErrorCode};
pub use http;
pub use serde::{Deserialize, Serialize};
