//! Inventory count reconciliation
//!
//! Compares a manual count entered per product against the stock the
//! system records for the selected warehouse.
//!
//! - `difference = manual - recorded`, signed, no rounding
//! - a product without an entry in the warehouse's stock map counts as 0
//! - the aggregate is `Correct` only when every difference is exactly 0
//!
//! State is owned by one [`Reconciliation`] per count session. Selecting a
//! warehouse (again or for the first time) resets every entry to 0 and
//! clears the aggregate until the next edit. Nothing is persisted.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{CountEntry, CountSubmission, Product};

/// Signed difference between the manual count and the recorded stock
///
/// Saturates at the `i64` bounds.
#[inline]
pub fn difference(manual: i64, recorded: i64) -> i64 {
    manual.saturating_sub(recorded)
}

fn sum_differences(lines: &[LineResult]) -> i64 {
    lines.iter().fold(0, |acc, l| acc.saturating_add(l.difference))
}

/// Classification of a single product's count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountClass {
    /// Manual matches recorded
    Equal,
    /// More units counted than recorded
    Greater,
    /// Fewer units counted than recorded
    Less,
}

impl CountClass {
    pub fn of(difference: i64) -> Self {
        match difference.signum() {
            0 => Self::Equal,
            1 => Self::Greater,
            _ => Self::Less,
        }
    }

    /// Wire value of the `alerta` field
    pub fn alert(&self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Greater => "greater",
            Self::Less => "less",
        }
    }

    pub fn treatment(&self) -> DisplayTreatment {
        match self {
            Self::Equal => DisplayTreatment::Check,
            Self::Greater => DisplayTreatment::Warning,
            Self::Less => DisplayTreatment::Error,
        }
    }
}

/// Fixed visual treatment for each classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayTreatment {
    Check,
    Warning,
    Error,
    /// Entry left empty
    Unset,
}

impl DisplayTreatment {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Check => "Cantidad Correcta",
            Self::Warning => "Cantidad Mayor",
            Self::Error => "Cantidad Menor",
            Self::Unset => "Sin Cambios",
        }
    }
}

/// Overall outcome of a count
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregateStatus {
    Correct,
    Discrepancy,
}

/// Result for one product
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineResult {
    pub product_id: i64,
    pub product_name: String,
    pub recorded: i64,
    /// `None` while the field is empty
    pub manual: Option<i64>,
    /// 0 while the field is empty
    pub difference: i64,
    /// `None` while the field is empty
    pub class: Option<CountClass>,
}

impl LineResult {
    pub fn treatment(&self) -> DisplayTreatment {
        self.class
            .map(|c| c.treatment())
            .unwrap_or(DisplayTreatment::Unset)
    }
}

/// Snapshot of the whole count
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationSummary {
    pub warehouse_id: Option<i64>,
    /// `None` right after a warehouse is selected
    pub status: Option<AggregateStatus>,
    pub total_difference: i64,
    pub lines: Vec<LineResult>,
}

/// Aggregate over already computed lines
///
/// An empty entry is never `Equal`, so it keeps the aggregate at
/// `Discrepancy`.
pub fn aggregate(lines: &[LineResult]) -> (AggregateStatus, i64) {
    let all_equal = lines.iter().all(|l| l.class == Some(CountClass::Equal));
    let total = sum_differences(lines);
    let status = if all_equal {
        AggregateStatus::Correct
    } else {
        AggregateStatus::Discrepancy
    };
    (status, total)
}

/// One count session over a product list
#[derive(Debug, Clone)]
pub struct Reconciliation {
    products: Vec<Product>,
    warehouse_id: Option<i64>,
    entries: BTreeMap<i64, Option<i64>>,
    status: Option<AggregateStatus>,
    responsible: String,
}

impl Reconciliation {
    pub fn new(products: Vec<Product>) -> Self {
        Self {
            products,
            warehouse_id: None,
            entries: BTreeMap::new(),
            status: None,
            responsible: String::new(),
        }
    }

    pub fn warehouse_id(&self) -> Option<i64> {
        self.warehouse_id
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Select (or re-select) the warehouse being counted
    ///
    /// Every entry goes back to 0 and the aggregate status is cleared.
    pub fn select_warehouse(&mut self, warehouse_id: i64) {
        self.warehouse_id = Some(warehouse_id);
        self.entries = self.products.iter().map(|p| (p.id, Some(0))).collect();
        self.status = None;
        tracing::debug!(warehouse_id, products = self.products.len(), "Count reset");
    }

    /// Enter or clear (`None`) the manual count for a product
    pub fn set_count(&mut self, product_id: i64, manual: Option<i64>) -> AppResult<LineResult> {
        if self.warehouse_id.is_none() {
            return Err(AppError::new(ErrorCode::WarehouseNotSelected));
        }
        let entry = self.entries.get_mut(&product_id).ok_or_else(|| {
            AppError::new(ErrorCode::ProductNotFound).with_detail("product_id", product_id)
        })?;
        *entry = manual;

        let lines = self.lines();
        let (status, _) = aggregate(&lines);
        self.status = Some(status);

        lines
            .into_iter()
            .find(|l| l.product_id == product_id)
            .ok_or_else(|| AppError::not_found(format!("Product {}", product_id)))
    }

    /// Recorded stock of a product in the selected warehouse
    pub fn recorded(&self, product_id: i64) -> i64 {
        match self.warehouse_id {
            Some(w) => self
                .products
                .iter()
                .find(|p| p.id == product_id)
                .map(|p| p.stock_in(w))
                .unwrap_or(0),
            None => 0,
        }
    }

    fn line_for(&self, product: &Product, warehouse_id: i64) -> LineResult {
        let recorded = product.stock_in(warehouse_id);
        let manual = self.entries.get(&product.id).copied().flatten();
        let difference = manual.map(|m| difference(m, recorded)).unwrap_or(0);
        LineResult {
            product_id: product.id,
            product_name: product.nombre.clone(),
            recorded,
            manual,
            difference,
            class: manual.map(|_| CountClass::of(difference)),
        }
    }

    /// Per-product results, in product order (empty before a warehouse is selected)
    pub fn lines(&self) -> Vec<LineResult> {
        let Some(w) = self.warehouse_id else {
            return Vec::new();
        };
        self.products.iter().map(|p| self.line_for(p, w)).collect()
    }

    pub fn status(&self) -> Option<AggregateStatus> {
        self.status
    }

    pub fn total_difference(&self) -> i64 {
        sum_differences(&self.lines())
    }

    pub fn summary(&self) -> ReconciliationSummary {
        let lines = self.lines();
        let total_difference = sum_differences(&lines);
        ReconciliationSummary {
            warehouse_id: self.warehouse_id,
            status: self.status,
            total_difference,
            lines,
        }
    }

    pub fn set_responsible(&mut self, name: impl Into<String>) {
        self.responsible = name.into();
    }

    pub fn responsible(&self) -> &str {
        &self.responsible
    }

    /// True while any product's field is empty
    pub fn has_unset_entries(&self) -> bool {
        self.entries.values().any(Option::is_none)
    }

    /// Check the submission guard without building the payload
    pub fn check_submittable(&self) -> AppResult<i64> {
        let warehouse_id = self
            .warehouse_id
            .ok_or_else(|| AppError::new(ErrorCode::WarehouseNotSelected))?;
        if self.has_unset_entries() {
            let missing: Vec<i64> = self
                .entries
                .iter()
                .filter(|(_, v)| v.is_none())
                .map(|(k, _)| *k)
                .collect();
            return Err(AppError::new(ErrorCode::CountIncomplete).with_detail("product_ids", missing));
        }
        if self.responsible.trim().is_empty() {
            return Err(AppError::new(ErrorCode::CountResponsibleRequired));
        }
        Ok(warehouse_id)
    }

    pub fn can_submit(&self) -> bool {
        self.check_submittable().is_ok()
    }

    /// Build the `POST /inventarios/ejecutar` body
    pub fn submission(&self) -> AppResult<CountSubmission> {
        let warehouse_id = self.check_submittable()?;
        let inventario = self
            .lines()
            .into_iter()
            .filter_map(|l| {
                let class = l.class?;
                Some((
                    l.product_id,
                    CountEntry {
                        cantidad: l.manual?,
                        alerta: class.alert().to_string(),
                        diferencia: l.difference,
                    },
                ))
            })
            .collect();
        Ok(CountSubmission {
            bodega_id: warehouse_id,
            inventario,
            responsable: self.responsible.trim().to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: i64 = 1;
    const OTHER: i64 = 2;

    fn product(id: i64, name: &str, stocks: &[(i64, i64)]) -> Product {
        Product {
            id,
            nombre: name.to_string(),
            stocks: stocks.iter().copied().collect(),
            ..Default::default()
        }
    }

    fn session() -> Reconciliation {
        Reconciliation::new(vec![
            product(10, "A", &[(W, 10), (OTHER, 4)]),
            product(20, "B", &[(W, 0)]),
        ])
    }

    #[test]
    fn test_classification() {
        assert_eq!(CountClass::of(0), CountClass::Equal);
        assert_eq!(CountClass::of(3), CountClass::Greater);
        assert_eq!(CountClass::of(-1), CountClass::Less);
        assert_eq!(CountClass::Equal.treatment(), DisplayTreatment::Check);
        assert_eq!(CountClass::Greater.treatment(), DisplayTreatment::Warning);
        assert_eq!(CountClass::Less.treatment(), DisplayTreatment::Error);
    }

    #[test]
    fn test_worked_example() {
        let mut r = session();
        r.select_warehouse(W);
        r.set_count(10, Some(10)).unwrap();
        let b = r.set_count(20, Some(2)).unwrap();
        assert_eq!(b.class, Some(CountClass::Greater));
        assert_eq!(b.difference, 2);

        let summary = r.summary();
        assert_eq!(summary.lines[0].class, Some(CountClass::Equal));
        assert_eq!(summary.lines[0].difference, 0);
        assert_eq!(summary.status, Some(AggregateStatus::Discrepancy));
        assert_eq!(summary.total_difference, 2);
    }

    #[test]
    fn test_all_equal_is_correct() {
        let mut r = session();
        r.select_warehouse(W);
        r.set_count(10, Some(10)).unwrap();
        r.set_count(20, Some(0)).unwrap();
        assert_eq!(r.status(), Some(AggregateStatus::Correct));
        assert_eq!(r.total_difference(), 0);
    }

    #[test]
    fn test_differences_that_cancel_are_still_discrepancy() {
        let mut r = session();
        r.select_warehouse(W);
        r.set_count(10, Some(8)).unwrap();
        r.set_count(20, Some(2)).unwrap();
        assert_eq!(r.total_difference(), 0);
        assert_eq!(r.status(), Some(AggregateStatus::Discrepancy));
    }

    #[test]
    fn test_missing_stock_entry_counts_as_zero() {
        let mut r = session();
        r.select_warehouse(OTHER);
        assert_eq!(r.recorded(20), 0);
        let b = r.set_count(20, Some(0)).unwrap();
        assert_eq!(b.class, Some(CountClass::Equal));
    }

    #[test]
    fn test_count_after_reselect_without_stock_entry() {
        let mut r = session();
        r.select_warehouse(W);
        r.set_count(20, Some(1)).unwrap();

        // B has no entry for OTHER
        r.select_warehouse(OTHER);
        let b = r.set_count(20, Some(3)).unwrap();
        assert_eq!(b.recorded, 0);
        assert_eq!(b.difference, 3);
        assert_eq!(b.class, Some(CountClass::Greater));
        assert_eq!(r.status(), Some(AggregateStatus::Discrepancy));
        // A was reset to 0 against 4 recorded
        assert_eq!(r.total_difference(), -1);
    }

    #[test]
    fn test_extreme_counts_saturate() {
        assert_eq!(difference(i64::MAX, -1), i64::MAX);
        assert_eq!(difference(i64::MIN, 1), i64::MIN);

        let mut r = Reconciliation::new(vec![
            product(1, "A", &[(W, -5)]),
            product(2, "B", &[(W, -5)]),
        ]);
        r.select_warehouse(W);
        r.set_count(1, Some(i64::MAX)).unwrap();
        let b = r.set_count(2, Some(i64::MAX)).unwrap();
        assert_eq!(b.difference, i64::MAX);
        assert_eq!(r.summary().total_difference, i64::MAX);
    }

    #[test]
    fn test_reselect_resets_entries_and_status() {
        let mut r = session();
        r.select_warehouse(W);
        r.set_count(10, Some(7)).unwrap();
        r.set_count(20, None).unwrap();
        assert!(r.status().is_some());

        r.select_warehouse(OTHER);
        assert_eq!(r.status(), None);
        assert!(r.lines().iter().all(|l| l.manual == Some(0)));
        assert!(!r.has_unset_entries());
        assert_eq!(r.lines()[0].recorded, 4);
        assert_eq!(r.lines()[0].difference, -4);
    }

    #[test]
    fn test_empty_entry() {
        let mut r = session();
        r.select_warehouse(W);
        let a = r.set_count(10, None).unwrap();
        assert_eq!(a.class, None);
        assert_eq!(a.difference, 0);
        assert_eq!(a.treatment(), DisplayTreatment::Unset);

        r.set_count(20, Some(0)).unwrap();
        assert_eq!(r.status(), Some(AggregateStatus::Discrepancy));
    }

    #[test]
    fn test_submission_guard() {
        let mut r = session();
        assert_eq!(
            r.submission().unwrap_err().code,
            ErrorCode::WarehouseNotSelected
        );

        r.select_warehouse(W);
        r.set_count(10, None).unwrap();
        r.set_responsible("Marta");
        assert_eq!(r.submission().unwrap_err().code, ErrorCode::CountIncomplete);

        r.set_count(10, Some(10)).unwrap();
        r.set_responsible("   ");
        assert_eq!(
            r.submission().unwrap_err().code,
            ErrorCode::CountResponsibleRequired
        );
        assert!(!r.can_submit());

        r.set_responsible(" Marta ");
        let payload = r.submission().unwrap();
        assert_eq!(payload.bodega_id, W);
        assert_eq!(payload.responsable, "Marta");
        assert_eq!(
            payload.inventario[&20],
            CountEntry {
                cantidad: 0,
                alerta: "equal".into(),
                diferencia: 0
            }
        );
    }

    #[test]
    fn test_edit_before_selection_is_rejected() {
        let mut r = session();
        assert_eq!(
            r.set_count(10, Some(1)).unwrap_err().code,
            ErrorCode::WarehouseNotSelected
        );
        r.select_warehouse(W);
        assert_eq!(
            r.set_count(99, Some(1)).unwrap_err().code,
            ErrorCode::ProductNotFound
        );
    }

    #[test]
    fn test_submission_json_shape() {
        let mut r = session();
        r.select_warehouse(W);
        r.set_count(10, Some(9)).unwrap();
        r.set_responsible("Marta");
        let json = serde_json::to_value(r.submission().unwrap()).unwrap();
        assert_eq!(json["inventario"]["10"]["alerta"], "less");
        assert_eq!(json["inventario"]["10"]["diferencia"], -1);
        assert_eq!(json["inventario"]["20"]["cantidad"], 0);
    }
}
