//! Accounts receivable (cartera)
//!
//! An invoiced order is due `diasCartera` days after it was placed. The
//! listing groups orders by how close they are to that date.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::models::{Order, OrderStatus};
use crate::money;

/// Orders due within this many days count as due soon
pub const DUE_SOON_DAYS: i64 = 5;

/// Due-date bucket
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DueBucket {
    /// More than [`DUE_SOON_DAYS`] left
    Current,
    /// Between 0 and [`DUE_SOON_DAYS`] days left
    DueSoon,
    /// Past due
    Overdue,
}

impl DueBucket {
    pub fn of(days_to_due: i64) -> Self {
        if days_to_due > DUE_SOON_DAYS {
            Self::Current
        } else if days_to_due >= 0 {
            Self::DueSoon
        } else {
            Self::Overdue
        }
    }
}

/// `diasCartera - whole 24h periods elapsed since the order was placed`
///
/// A date-only `fecha_hora` counts from midnight. `None` when the order
/// date cannot be parsed.
pub fn days_to_due(order: &Order, now: NaiveDateTime) -> Option<i64> {
    let placed = order
        .placed_at()
        .or_else(|| order.date().and_then(|d| d.and_hms_opt(0, 0, 0)))?;
    Some(order.dias_cartera - (now - placed).num_days())
}

/// One row of the receivables listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceivableRow {
    pub order_id: i64,
    pub client: String,
    pub date: Option<NaiveDate>,
    pub status: OrderStatus,
    pub total: f64,
    pub days_to_due: Option<i64>,
    pub bucket: Option<DueBucket>,
    pub factura_url: Option<String>,
    pub recibo_url: Option<String>,
}

/// Listing filters; `None` means all
#[derive(Debug, Clone, Default)]
pub struct ReceivableFilter {
    pub date: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
}

impl ReceivableFilter {
    fn matches(&self, order: &Order) -> bool {
        self.date.is_none_or(|d| order.date() == Some(d))
            && self.status.is_none_or(|s| order.estado == s)
    }
}

/// Build the listing: filtered, paid invoices last, the rest by ascending days to due
pub fn listing(orders: &[Order], filter: &ReceivableFilter, now: NaiveDateTime) -> Vec<ReceivableRow> {
    let mut rows: Vec<ReceivableRow> = orders
        .iter()
        .filter(|o| filter.matches(o))
        .map(|o| {
            let days = days_to_due(o, now);
            ReceivableRow {
                order_id: o.id,
                client: o.nombre_completo.clone(),
                date: o.date(),
                status: o.estado,
                total: o.sale_total(),
                days_to_due: days,
                bucket: days.map(DueBucket::of),
                factura_url: o.factura_url.clone(),
                recibo_url: o.recibo_url.clone(),
            }
        })
        .collect();

    rows.sort_by_key(|r| {
        (
            r.status == OrderStatus::Paid,
            r.days_to_due.unwrap_or(i64::MAX),
        )
    });
    rows
}

/// Distinct order dates, ascending
pub fn order_dates(orders: &[Order]) -> Vec<NaiveDate> {
    let mut dates: Vec<NaiveDate> = orders.iter().filter_map(Order::date).collect();
    dates.sort();
    dates.dedup();
    dates
}

/// Headline figures of the receivables screen
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ReceivableTotals {
    /// Invoiced, due within [`DUE_SOON_DAYS`]
    pub due_soon: f64,
    /// Invoiced, past due
    pub overdue: f64,
    /// Paid invoices
    pub paid: f64,
}

pub fn totals(orders: &[Order], now: NaiveDateTime) -> ReceivableTotals {
    let bucket_sum = |bucket: DueBucket| {
        money::sum(
            orders
                .iter()
                .filter(|o| o.estado == OrderStatus::Invoiced)
                .filter(|o| days_to_due(o, now).map(DueBucket::of) == Some(bucket))
                .map(Order::sale_total),
        )
    };
    ReceivableTotals {
        due_soon: bucket_sum(DueBucket::DueSoon),
        overdue: bucket_sum(DueBucket::Overdue),
        paid: money::sum(
            orders
                .iter()
                .filter(|o| o.estado == OrderStatus::Paid)
                .map(Order::sale_total),
        ),
    }
}

/// Merge the result of an invoice upload into the local order
pub fn apply_invoice(order: &mut Order, factura_url: Option<String>) {
    order.estado = OrderStatus::Invoiced;
    if factura_url.is_some() {
        order.factura_url = factura_url;
    }
}

/// Merge the result of a receipt upload into the local order
pub fn apply_receipt(order: &mut Order, recibo_url: Option<String>) {
    order.estado = OrderStatus::Paid;
    if recibo_url.is_some() {
        order.recibo_url = recibo_url;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 30)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn order(id: i64, date: &str, dias: i64, estado: &str, total: f64) -> Order {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "nombre_completo": format!("Cliente {}", id),
            "fecha_hora": format!("{} 09:00:00", date),
            "estado": estado,
            "total_productos": total,
            "diasCartera": dias,
        }))
        .unwrap()
    }

    #[test]
    fn test_buckets() {
        assert_eq!(DueBucket::of(6), DueBucket::Current);
        assert_eq!(DueBucket::of(5), DueBucket::DueSoon);
        assert_eq!(DueBucket::of(0), DueBucket::DueSoon);
        assert_eq!(DueBucket::of(-1), DueBucket::Overdue);
    }

    #[test]
    fn test_days_to_due() {
        let o = order(1, "2024-06-10", 30, "Pedido Facturado", 100.0);
        assert_eq!(days_to_due(&o, now()), Some(10));
        let o = order(2, "2024-05-01", 30, "Pedido Facturado", 100.0);
        assert_eq!(days_to_due(&o, now()), Some(-30));
    }

    #[test]
    fn test_days_to_due_counts_full_days_only() {
        let mut o = order(1, "2024-06-10", 30, "Pedido Facturado", 100.0);
        o.fecha_hora = "2024-06-10 15:00:00".into();
        // 19 days and 21 hours elapsed
        assert_eq!(days_to_due(&o, now()), Some(11));

        o.fecha_hora = "2024-06-10".into();
        assert_eq!(days_to_due(&o, now()), Some(10));

        o.fecha_hora = "ayer".into();
        assert_eq!(days_to_due(&o, now()), None);
    }

    #[test]
    fn test_listing_order() {
        let orders = [
            order(1, "2024-06-20", 30, "Factura Pagada", 10.0),
            order(2, "2024-06-25", 30, "Pedido Facturado", 10.0),
            order(3, "2024-05-01", 30, "Pedido Facturado", 10.0),
            order(4, "2024-06-01", 30, "Pedido Recibido", 10.0),
        ];
        let ids: Vec<i64> = listing(&orders, &ReceivableFilter::default(), now())
            .iter()
            .map(|r| r.order_id)
            .collect();
        assert_eq!(ids, vec![3, 4, 2, 1]);
    }

    #[test]
    fn test_filters() {
        let orders = [
            order(1, "2024-06-20", 30, "Factura Pagada", 10.0),
            order(2, "2024-06-20", 30, "Pedido Facturado", 10.0),
            order(3, "2024-06-21", 30, "Pedido Facturado", 10.0),
        ];
        let filter = ReceivableFilter {
            date: NaiveDate::from_ymd_opt(2024, 6, 20),
            status: Some(OrderStatus::Invoiced),
        };
        let rows = listing(&orders, &filter, now());
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].order_id, 2);
        assert_eq!(order_dates(&orders).len(), 2);
    }

    #[test]
    fn test_totals() {
        let orders = [
            order(1, "2024-06-27", 5, "Pedido Facturado", 100.0), // 2 days left
            order(2, "2024-06-01", 5, "Pedido Facturado", 250.0), // overdue
            order(3, "2024-06-01", 5, "Pedido Recibido", 999.0),  // not invoiced
            order(4, "2024-06-29", 30, "Pedido Facturado", 50.0), // current
            order(5, "2024-06-01", 5, "Factura Pagada", 70.0),
        ];
        let t = totals(&orders, now());
        assert_eq!(t.due_soon, 100.0);
        assert_eq!(t.overdue, 250.0);
        assert_eq!(t.paid, 70.0);
    }

    #[test]
    fn test_apply_uploads() {
        let mut o = order(1, "2024-06-27", 5, "Pedido Recibido", 100.0);
        apply_invoice(&mut o, Some("https://files/f1.pdf".into()));
        assert_eq!(o.estado, OrderStatus::Invoiced);
        assert_eq!(o.factura_url.as_deref(), Some("https://files/f1.pdf"));
        apply_receipt(&mut o, None);
        assert_eq!(o.estado, OrderStatus::Paid);
        assert!(o.recibo_url.is_none());
    }
}
