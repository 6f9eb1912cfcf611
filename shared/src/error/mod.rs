//! Error system shared by the panel crates
//!
//! - [`ErrorCode`]: Standardized error codes, grouped by business area
//! - [`ErrorCategory`]: Classification of errors by area
//! - [`AppError`]: Error with code, message and details
//! - [`ErrorBody`]: Error body as sent by the backend
//!
//! # Example
//!
//! ```
//! use shared::error::{AppError, ErrorCode};
//!
//! let err = AppError::new(ErrorCode::CountResponsibleRequired);
//! assert_eq!(err.code.code(), 7102);
//!
//! let err = AppError::required("nombre").with_detail("form", "bodega");
//! assert_eq!(err.details.map(|d| d.len()), Some(2));
//! ```

mod category;
mod codes;
mod status;
mod types;

pub use category::ErrorCategory;
pub use codes::{ErrorCode, InvalidErrorCode};
pub use types::{Acknowledgement, AppError, AppResult, ErrorBody};
