//! Inventory calculations
//!
//! - [`reconciliation`]: manual count vs. recorded stock for one warehouse
//! - [`stock`]: totals, low-stock detection, valuation, search
//! - [`records`]: summary of executed counts

pub mod reconciliation;
pub mod records;
pub mod stock;

pub use reconciliation::{
    AggregateStatus, CountClass, DisplayTreatment, LineResult, Reconciliation,
    ReconciliationSummary,
};
pub use records::{RecordSummary, summarize_records};
