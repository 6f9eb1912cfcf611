//! Resource APIs
//!
//! One module per backend resource, each adding methods to
//! [`PanelClient`](crate::PanelClient). Local validation runs before any
//! request is sent; successful writes are merged into the caller's data
//! where the backend answers with less than the full entity.

mod catalog;
mod clients;
mod commercials;
mod expenses;
mod inventory;
mod orders;
mod price_lists;
mod products;
mod warehouses;

/// Body of DELETE responses, which carry nothing the client needs
pub(crate) type Ignored = serde::de::IgnoredAny;
