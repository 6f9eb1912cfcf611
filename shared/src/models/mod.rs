//! Data models
//!
//! Mirrors the backend's JSON. Field names on the wire are Spanish
//! snake_case (with a few camelCase stragglers such as `diasCartera`),
//! mapped onto English Rust names through serde renames.
//! All IDs are `i64`.

pub mod auth;
pub mod category;
pub mod client;
pub mod commercial;
pub mod expense;
pub mod inventory;
pub mod order;
pub mod price_list;
pub mod product;
pub mod warehouse;

// Re-exports
pub use auth::*;
pub use category::*;
pub use client::*;
pub use commercial::*;
pub use expense::*;
pub use inventory::*;
pub use order::*;
pub use price_list::*;
pub use product::*;
pub use warehouse::*;

/// Lenient deserializers for fields the backend does not type consistently
pub(crate) mod de {
    use std::collections::BTreeMap;

    use serde::{Deserialize, Deserializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumOrStr {
        Int(i64),
        Float(f64),
        Str(String),
    }

    /// Accept `12`, `12.0`, `"12"` or `null` (as 0)
    pub fn i64_lenient<'de, D>(deserializer: D) -> Result<i64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumOrStr>::deserialize(deserializer)? {
            None => Ok(0),
            Some(NumOrStr::Int(v)) => Ok(v),
            Some(NumOrStr::Float(v)) => Ok(v as i64),
            Some(NumOrStr::Str(s)) if s.trim().is_empty() => Ok(0),
            Some(NumOrStr::Str(s)) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }

    /// Accept `1500`, `1500.5`, `"1500.5"` or `null` (as 0.0)
    pub fn f64_lenient<'de, D>(deserializer: D) -> Result<f64, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumOrStr>::deserialize(deserializer)? {
            None => Ok(0.0),
            Some(NumOrStr::Int(v)) => Ok(v as f64),
            Some(NumOrStr::Float(v)) => Ok(v),
            Some(NumOrStr::Str(s)) if s.trim().is_empty() => Ok(0.0),
            Some(NumOrStr::Str(s)) => s.trim().parse().map_err(serde::de::Error::custom),
        }
    }

    #[derive(Deserialize)]
    #[serde(transparent)]
    struct LenientI64(#[serde(deserialize_with = "i64_lenient")] i64);

    /// Map of id to units where each value goes through [`i64_lenient`];
    /// a `null` map is empty
    pub fn stock_map_lenient<'de, D>(deserializer: D) -> Result<BTreeMap<i64, i64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map = Option::<BTreeMap<i64, LenientI64>>::deserialize(deserializer)?;
        Ok(map
            .unwrap_or_default()
            .into_iter()
            .map(|(id, LenientI64(units))| (id, units))
            .collect())
    }

    /// Like [`f64_lenient`] but keeps absence distinct from zero
    pub fn opt_f64_lenient<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<NumOrStr>::deserialize(deserializer)? {
            None => Ok(None),
            Some(NumOrStr::Int(v)) => Ok(Some(v as f64)),
            Some(NumOrStr::Float(v)) => Ok(Some(v)),
            Some(NumOrStr::Str(s)) if s.trim().is_empty() => Ok(None),
            Some(NumOrStr::Str(s)) => s
                .trim()
                .parse()
                .map(Some)
                .map_err(serde::de::Error::custom),
        }
    }
}
