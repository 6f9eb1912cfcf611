//! Expense (gasto) Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};

/// Approval lifecycle of an expense
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExpenseStatus {
    #[default]
    #[serde(rename = "Pago Pendiente por aprobacion")]
    PendingApproval,
    #[serde(rename = "Pago Aprobado")]
    Approved,
    #[serde(rename = "Pago Realizado")]
    Paid,
}

impl ExpenseStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::PendingApproval => "Pago Pendiente por aprobacion",
            Self::Approved => "Pago Aprobado",
            Self::Paid => "Pago Realizado",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        [Self::PendingApproval, Self::Approved, Self::Paid]
            .into_iter()
            .find(|s| s.label() == label)
    }
}

/// Expense entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: i64,
    pub tipo_gasto: String,
    #[serde(default)]
    pub descripcion: Option<String>,
    #[serde(deserialize_with = "super::de::f64_lenient")]
    pub monto: f64,
    /// `YYYY-MM-DD` (a trailing time part is tolerated)
    pub fecha: String,
    #[serde(default)]
    pub status: ExpenseStatus,
    #[serde(default)]
    pub soporte_url: Option<String>,
}

impl Expense {
    pub fn date(&self) -> Option<NaiveDate> {
        let day = self.fecha.get(..10).unwrap_or(&self.fecha);
        NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
    }
}

/// Create / update expense payload (multipart form fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseInput {
    pub tipo_gasto: String,
    pub descripcion: String,
    pub monto: f64,
    pub fecha: NaiveDate,
    pub status: ExpenseStatus,
}

impl ExpenseInput {
    /// Check the amount, and that a supporting document is only attached
    /// to an approved expense
    pub fn validate(&self, has_support: bool) -> AppResult<()> {
        if self.tipo_gasto.trim().is_empty() {
            return Err(AppError::required("tipo_gasto"));
        }
        if !self.monto.is_finite() || self.monto <= 0.0 {
            return Err(AppError::new(ErrorCode::ExpenseInvalidAmount).with_detail("monto", self.monto));
        }
        if has_support && self.status != ExpenseStatus::Approved {
            return Err(AppError::new(ErrorCode::ExpenseNotApproved));
        }
        Ok(())
    }

    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("tipo_gasto", self.tipo_gasto.clone()),
            ("descripcion", self.descripcion.clone()),
            ("monto", self.monto.to_string()),
            ("fecha", self.fecha.format("%Y-%m-%d").to_string()),
            ("status", self.status.label().to_string()),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(status: ExpenseStatus) -> ExpenseInput {
        ExpenseInput {
            tipo_gasto: "Transporte".into(),
            descripcion: "Flete Medellín".into(),
            monto: 85000.0,
            fecha: NaiveDate::from_ymd_opt(2024, 5, 2).unwrap(),
            status,
        }
    }

    #[test]
    fn test_support_requires_approval() {
        assert!(input(ExpenseStatus::Approved).validate(true).is_ok());
        assert!(input(ExpenseStatus::PendingApproval).validate(false).is_ok());
        assert_eq!(
            input(ExpenseStatus::PendingApproval)
                .validate(true)
                .unwrap_err()
                .code,
            ErrorCode::ExpenseNotApproved
        );
    }

    #[test]
    fn test_invalid_amount() {
        let mut e = input(ExpenseStatus::Paid);
        e.monto = 0.0;
        assert_eq!(
            e.validate(false).unwrap_err().code,
            ErrorCode::ExpenseInvalidAmount
        );
    }

    #[test]
    fn test_expense_date_and_status() {
        let e: Expense = serde_json::from_str(
            r#"{"id": 1, "tipo_gasto": "Nómina", "monto": "1200000", "fecha": "2024-05-31T00:00:00", "status": "Pago Realizado"}"#,
        )
        .unwrap();
        assert_eq!(e.status, ExpenseStatus::Paid);
        assert_eq!(e.date(), NaiveDate::from_ymd_opt(2024, 5, 31));
        assert_eq!(e.monto, 1_200_000.0);
    }
}
