//! Argument parsers and input files

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, bail};
use shared::models::{ExpenseStatus, OrderStatus};

/// `ID=QTY` pair of a stock movement
pub fn parse_item(s: &str) -> Result<(i64, i64), String> {
    let (id, qty) = s
        .split_once('=')
        .ok_or_else(|| format!("expected PRODUCT_ID=QTY, got {:?}", s))?;
    let id = id.trim().parse().map_err(|_| format!("bad product id {:?}", id))?;
    let qty = qty.trim().parse().map_err(|_| format!("bad quantity {:?}", qty))?;
    Ok((id, qty))
}

pub fn parse_order_status(s: &str) -> Result<OrderStatus, String> {
    match s.to_ascii_lowercase().as_str() {
        "recibido" | "received" => Ok(OrderStatus::Received),
        "facturado" | "invoiced" => Ok(OrderStatus::Invoiced),
        "pagado" | "paid" => Ok(OrderStatus::Paid),
        _ => OrderStatus::from_label(s).ok_or_else(|| format!("unknown order status {:?}", s)),
    }
}

pub fn parse_expense_status(s: &str) -> Result<ExpenseStatus, String> {
    match s.to_ascii_lowercase().as_str() {
        "pendiente" | "pending" => Ok(ExpenseStatus::PendingApproval),
        "aprobado" | "approved" => Ok(ExpenseStatus::Approved),
        "pagado" | "paid" => Ok(ExpenseStatus::Paid),
        _ => ExpenseStatus::from_label(s).ok_or_else(|| format!("unknown expense status {:?}", s)),
    }
}

/// Read manual counts: a JSON object of product id → units, `null` for an
/// empty field
pub fn read_counts(path: &Path) -> anyhow::Result<BTreeMap<i64, Option<i64>>> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading counts from {}", path.display()))?;
    let counts: BTreeMap<i64, Option<i64>> =
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    if counts.is_empty() {
        bail!("{} holds no counts", path.display());
    }
    Ok(counts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_item() {
        assert_eq!(parse_item("12=5"), Ok((12, 5)));
        assert_eq!(parse_item(" 3 = 40 "), Ok((3, 40)));
        assert!(parse_item("12").is_err());
        assert!(parse_item("x=1").is_err());
    }

    #[test]
    fn test_parse_statuses() {
        assert_eq!(parse_order_status("Facturado"), Ok(OrderStatus::Invoiced));
        assert_eq!(parse_order_status("Factura Pagada"), Ok(OrderStatus::Paid));
        assert!(parse_order_status("enviado").is_err());
        assert_eq!(
            parse_expense_status("Pago Aprobado"),
            Ok(ExpenseStatus::Approved)
        );
        assert_eq!(
            parse_expense_status("pending"),
            Ok(ExpenseStatus::PendingApproval)
        );
    }

    #[test]
    fn test_read_counts() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("conteo.json");
        std::fs::write(&path, r#"{"1": 10, "2": null}"#).unwrap();
        let counts = read_counts(&path).unwrap();
        assert_eq!(counts.get(&1), Some(&Some(10)));
        assert_eq!(counts.get(&2), Some(&None));

        std::fs::write(&path, "{}").unwrap();
        assert!(read_counts(&path).is_err());
    }
}
