//! Expense listing filters and totals

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use crate::models::{Expense, ExpenseStatus};
use crate::money;

/// Expense listing filter; `None` means all
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExpenseFilter {
    /// Calendar month (1-12)
    pub month: Option<u32>,
    pub year: Option<i32>,
    pub tipo_gasto: Option<String>,
    pub status: Option<ExpenseStatus>,
}

impl ExpenseFilter {
    pub fn matches(&self, expense: &Expense) -> bool {
        let date = expense.date();
        self.month.is_none_or(|m| date.map(|d| d.month()) == Some(m))
            && self.year.is_none_or(|y| date.map(|d| d.year()) == Some(y))
            && self
                .tipo_gasto
                .as_deref()
                .is_none_or(|t| expense.tipo_gasto.eq_ignore_ascii_case(t))
            && self.status.is_none_or(|s| expense.status == s)
    }

    pub fn apply<'a>(&self, expenses: &'a [Expense]) -> Vec<&'a Expense> {
        expenses.iter().filter(|e| self.matches(e)).collect()
    }
}

/// Sum of `monto`
pub fn total<'a, I>(expenses: I) -> f64
where
    I: IntoIterator<Item = &'a Expense>,
{
    money::sum(expenses.into_iter().map(|e| e.monto))
}

/// Distinct expense types, sorted
pub fn expense_types(expenses: &[Expense]) -> Vec<String> {
    let mut types: Vec<String> = expenses.iter().map(|e| e.tipo_gasto.clone()).collect();
    types.sort();
    types.dedup();
    types
}

/// Merge an approval into the local list
pub fn apply_approval(expenses: &mut [Expense], id: i64) -> bool {
    match expenses.iter_mut().find(|e| e.id == id) {
        Some(e) => {
            e.status = ExpenseStatus::Approved;
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn expense(id: i64, tipo: &str, monto: f64, fecha: &str, status: ExpenseStatus) -> Expense {
        Expense {
            id,
            tipo_gasto: tipo.into(),
            descripcion: None,
            monto,
            fecha: fecha.into(),
            status,
            soporte_url: None,
        }
    }

    fn sample() -> Vec<Expense> {
        vec![
            expense(1, "Transporte", 100.5, "2024-05-02", ExpenseStatus::Paid),
            expense(2, "Nómina", 2000.0, "2024-05-30", ExpenseStatus::PendingApproval),
            expense(3, "Transporte", 50.25, "2024-06-01", ExpenseStatus::Approved),
        ]
    }

    #[test]
    fn test_filter_by_month_type_status() {
        let all = sample();
        let may = ExpenseFilter {
            month: Some(5),
            ..Default::default()
        };
        assert_eq!(total(may.apply(&all)), 2100.5);

        let transport = ExpenseFilter {
            tipo_gasto: Some("transporte".into()),
            ..Default::default()
        };
        assert_eq!(total(transport.apply(&all)), 150.75);

        let approved = ExpenseFilter {
            status: Some(ExpenseStatus::Approved),
            ..Default::default()
        };
        assert_eq!(approved.apply(&all).len(), 1);
        assert_eq!(total(&all), 2150.75);
    }

    #[test]
    fn test_types_and_approval() {
        let mut all = sample();
        assert_eq!(expense_types(&all), vec!["Nómina", "Transporte"]);
        assert!(apply_approval(&mut all, 2));
        assert_eq!(all[1].status, ExpenseStatus::Approved);
        assert!(!apply_approval(&mut all, 42));
    }
}
