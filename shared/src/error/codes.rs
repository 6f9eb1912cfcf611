//! Error codes for the panel workspace
//!
//! Codes are grouped by the business area they belong to:
//! - 0xxx: General errors
//! - 1xxx: Authentication errors
//! - 2xxx: Permission errors
//! - 3xxx: Client / commercial team errors
//! - 4xxx: Order errors
//! - 5xxx: Expense errors
//! - 6xxx: Product catalog errors
//! - 7xxx: Warehouse / inventory errors
//! - 9xxx: System errors

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error code enum
///
/// Serialized as a plain `u16` so it can travel inside JSON bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u16", try_from = "u16")]
#[repr(u16)]
pub enum ErrorCode {
    // ==================== 0xxx: General ====================
    /// Operation completed successfully
    Success = 0,
    /// Unknown error
    Unknown = 1,
    /// Validation failed
    ValidationFailed = 2,
    /// Resource not found
    NotFound = 3,
    /// Resource already exists
    AlreadyExists = 4,
    /// Invalid format
    InvalidFormat = 6,
    /// Required field missing
    RequiredField = 7,
    /// Value out of range
    ValueOutOfRange = 8,

    // ==================== 1xxx: Auth ====================
    /// User is not authenticated
    NotAuthenticated = 1001,
    /// Invalid credentials (username/password)
    InvalidCredentials = 1002,
    /// Token has expired
    TokenExpired = 1003,
    /// Session has expired and was cleared
    SessionExpired = 1005,

    // ==================== 2xxx: Permission ====================
    /// Permission denied
    PermissionDenied = 2001,
    /// Approval password rejected
    ApprovalPasswordInvalid = 2002,

    // ==================== 3xxx: Clients ====================
    ClientNotFound = 3001,
    PriceListNotFound = 3201,
    /// Discount outside 0..=100
    PriceListDiscountInvalid = 3202,

    // ==================== 4xxx: Order ====================
    OrderNotFound = 4001,
    OrderEmpty = 4002,
    /// Delivery confirmation without a responsible person
    DeliveryResponsibleRequired = 4003,
    /// Order lines could not be decoded
    OrderLinesInvalid = 4004,

    // ==================== 5xxx: Expense ====================
    /// Supporting document attached before approval
    ExpenseNotApproved = 5002,
    ExpenseInvalidAmount = 5003,

    // ==================== 6xxx: Product ====================
    ProductNotFound = 6001,
    ProductInvalidPrice = 6002,
    CategoryNameRequired = 6102,

    // ==================== 65xx: File Upload ====================
    EmptyFile = 6505,
    NoFilename = 6506,

    // ==================== 7xxx: Inventory ====================
    WarehouseNotFound = 7001,
    WarehouseNameRequired = 7002,
    WarehouseNotSelected = 7003,
    /// A manual count field is still empty
    CountIncomplete = 7101,
    /// Count submitted without a responsible person
    CountResponsibleRequired = 7102,
    MovementTypeInvalid = 7201,
    MovementEmpty = 7202,

    // ==================== 9xxx: System ====================
    InternalError = 9001,
    NetworkError = 9003,
    TimeoutError = 9004,
    ConfigError = 9005,
}

impl ErrorCode {
    #[inline]
    pub const fn code(&self) -> u16 {
        *self as u16
    }

    pub const fn message(&self) -> &'static str {
        match self {
            // General
            ErrorCode::Success => "Operation completed successfully",
            ErrorCode::Unknown => "An unknown error occurred",
            ErrorCode::ValidationFailed => "Validation failed",
            ErrorCode::NotFound => "Resource not found",
            ErrorCode::AlreadyExists => "Resource already exists",
            ErrorCode::InvalidFormat => "Invalid format",
            ErrorCode::RequiredField => "Required field is missing",
            ErrorCode::ValueOutOfRange => "Value is out of range",

            // Auth
            ErrorCode::NotAuthenticated => "User is not authenticated",
            ErrorCode::InvalidCredentials => "Invalid username or password",
            ErrorCode::TokenExpired => "Authentication token has expired",
            ErrorCode::SessionExpired => "Session has expired",

            // Permission
            ErrorCode::PermissionDenied => "Permission denied",
            ErrorCode::ApprovalPasswordInvalid => "Approval password is invalid",

            // Clients
            ErrorCode::ClientNotFound => "Client not found",
            ErrorCode::PriceListNotFound => "Price list not found",
            ErrorCode::PriceListDiscountInvalid => "Discount must be between 0 and 100",

            // Order
            ErrorCode::OrderNotFound => "Order not found",
            ErrorCode::OrderEmpty => "Order has no products",
            ErrorCode::DeliveryResponsibleRequired => "Delivery responsible is required",
            ErrorCode::OrderLinesInvalid => "Order product lines are malformed",

            // Expense
            ErrorCode::ExpenseNotApproved => {
                "Supporting document requires an approved expense"
            }
            ErrorCode::ExpenseInvalidAmount => "Expense amount is invalid",

            // Product
            ErrorCode::ProductNotFound => "Product not found",
            ErrorCode::ProductInvalidPrice => "Product has invalid price",
            ErrorCode::CategoryNameRequired => "Category name is required",

            // File Upload
            ErrorCode::EmptyFile => "Empty file provided",
            ErrorCode::NoFilename => "No filename provided",

            // Inventory
            ErrorCode::WarehouseNotFound => "Warehouse not found",
            ErrorCode::WarehouseNameRequired => "Warehouse name is required",
            ErrorCode::WarehouseNotSelected => "No warehouse selected",
            ErrorCode::CountIncomplete => "Every product needs a manual count",
            ErrorCode::CountResponsibleRequired => "Count responsible is required",
            ErrorCode::MovementTypeInvalid => "Invalid stock movement type",
            ErrorCode::MovementEmpty => "Stock movement has no products",

            // System
            ErrorCode::InternalError => "Internal server error",
            ErrorCode::NetworkError => "Network error",
            ErrorCode::TimeoutError => "Operation timed out",
            ErrorCode::ConfigError => "Configuration error",
        }
    }
}

impl From<ErrorCode> for u16 {
    fn from(code: ErrorCode) -> Self {
        code.code()
    }
}

/// Error when converting from an invalid u16 to ErrorCode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidErrorCode(pub u16);

impl fmt::Display for InvalidErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid error code: {}", self.0)
    }
}

impl std::error::Error for InvalidErrorCode {}

impl TryFrom<u16> for ErrorCode {
    type Error = InvalidErrorCode;

    fn try_from(value: u16) -> Result<Self, Self::Error> {
        match value {
            // General
            0 => Ok(ErrorCode::Success),
            1 => Ok(ErrorCode::Unknown),
            2 => Ok(ErrorCode::ValidationFailed),
            3 => Ok(ErrorCode::NotFound),
            4 => Ok(ErrorCode::AlreadyExists),
            6 => Ok(ErrorCode::InvalidFormat),
            7 => Ok(ErrorCode::RequiredField),
            8 => Ok(ErrorCode::ValueOutOfRange),

            // Auth
            1001 => Ok(ErrorCode::NotAuthenticated),
            1002 => Ok(ErrorCode::InvalidCredentials),
            1003 => Ok(ErrorCode::TokenExpired),
            1005 => Ok(ErrorCode::SessionExpired),

            // Permission
            2001 => Ok(ErrorCode::PermissionDenied),
            2002 => Ok(ErrorCode::ApprovalPasswordInvalid),

            // Clients
            3001 => Ok(ErrorCode::ClientNotFound),
            3201 => Ok(ErrorCode::PriceListNotFound),
            3202 => Ok(ErrorCode::PriceListDiscountInvalid),

            // Order
            4001 => Ok(ErrorCode::OrderNotFound),
            4002 => Ok(ErrorCode::OrderEmpty),
            4003 => Ok(ErrorCode::DeliveryResponsibleRequired),
            4004 => Ok(ErrorCode::OrderLinesInvalid),

            // Expense
            5002 => Ok(ErrorCode::ExpenseNotApproved),
            5003 => Ok(ErrorCode::ExpenseInvalidAmount),

            // Product
            6001 => Ok(ErrorCode::ProductNotFound),
            6002 => Ok(ErrorCode::ProductInvalidPrice),
            6102 => Ok(ErrorCode::CategoryNameRequired),

            // File Upload
            6505 => Ok(ErrorCode::EmptyFile),
            6506 => Ok(ErrorCode::NoFilename),

            // Inventory
            7001 => Ok(ErrorCode::WarehouseNotFound),
            7002 => Ok(ErrorCode::WarehouseNameRequired),
            7003 => Ok(ErrorCode::WarehouseNotSelected),
            7101 => Ok(ErrorCode::CountIncomplete),
            7102 => Ok(ErrorCode::CountResponsibleRequired),
            7201 => Ok(ErrorCode::MovementTypeInvalid),
            7202 => Ok(ErrorCode::MovementEmpty),

            // System
            9001 => Ok(ErrorCode::InternalError),
            9003 => Ok(ErrorCode::NetworkError),
            9004 => Ok(ErrorCode::TimeoutError),
            9005 => Ok(ErrorCode::ConfigError),

            _ => Err(InvalidErrorCode(value)),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
