//! Sales, dispatch and commercial performance figures

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult, ErrorCode};
use crate::models::{DeliveryStatus, DeliveryUpdate, Order, OrderLine, OrderStatus};
use crate::money::{self, to_decimal, to_f64};

/// Commission paid to commercials over their sales
pub const COMMISSION_RATE: f64 = 0.10;

/// Order listing filter; `None` means all
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// `YYYY-MM`
    pub month: Option<String>,
    pub date: Option<NaiveDate>,
    pub delivery: Option<DeliveryStatus>,
}

impl OrderFilter {
    pub fn matches(&self, order: &Order) -> bool {
        self.month
            .as_deref()
            .is_none_or(|m| order.month_key().as_deref() == Some(m))
            && self.date.is_none_or(|d| order.date() == Some(d))
            && self.delivery.is_none_or(|s| order.estado_entrega == s)
    }

    /// Matching orders, newest first
    pub fn apply<'a>(&self, orders: &'a [Order]) -> Vec<&'a Order> {
        let mut out: Vec<&Order> = orders.iter().filter(|o| self.matches(o)).collect();
        sort_newest_first(&mut out);
        out
    }
}

/// Sort by `fecha_hora` descending; unparseable dates sink to the end
pub fn sort_newest_first(orders: &mut [&Order]) {
    fn key(o: &Order) -> Option<NaiveDateTime> {
        o.placed_at()
            .or_else(|| o.date().and_then(|d| d.and_hms_opt(0, 0, 0)))
    }
    orders.sort_by(|a, b| key(b).cmp(&key(a)));
}

/// Distinct `YYYY-MM` keys, ascending
pub fn order_months(orders: &[Order]) -> Vec<String> {
    let mut months: Vec<String> = orders.iter().filter_map(Order::month_key).collect();
    months.sort();
    months.dedup();
    months
}

/// Sales headline figures
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SalesTotals {
    pub total: f64,
    pub received: f64,
    pub invoiced: f64,
    pub paid: f64,
}

pub fn sales_totals<'a, I>(orders: I) -> SalesTotals
where
    I: IntoIterator<Item = &'a Order>,
{
    let orders: Vec<&Order> = orders.into_iter().collect();
    let by_status = |status: OrderStatus| {
        money::sum(
            orders
                .iter()
                .filter(|o| o.estado == status)
                .map(|o| o.sale_total()),
        )
    };
    SalesTotals {
        total: money::sum(orders.iter().map(|o| o.sale_total())),
        received: by_status(OrderStatus::Received),
        invoiced: by_status(OrderStatus::Invoiced),
        paid: by_status(OrderStatus::Paid),
    }
}

/// Units pending dispatch, per product name
///
/// Only orders still `Pendiente` count. Lines without a name fall back to
/// `names` (product id → name), then to `#id`.
pub fn pending_dispatch(
    orders: &[Order],
    names: &BTreeMap<i64, String>,
) -> AppResult<BTreeMap<String, i64>> {
    let mut totals = BTreeMap::new();
    for order in orders
        .iter()
        .filter(|o| o.estado_entrega == DeliveryStatus::Pending)
    {
        for line in order.lines()? {
            let name = line
                .name
                .clone()
                .or_else(|| names.get(&line.id).cloned())
                .unwrap_or_else(|| format!("#{}", line.id));
            *totals.entry(name).or_insert(0) += line.quantity;
        }
    }
    Ok(totals)
}

/// Totals of an order's product lines
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LineTotals {
    /// `Σ quantity × price`
    pub amount: f64,
    /// `Σ quantity`
    pub units: i64,
}

pub fn line_totals(lines: &[OrderLine]) -> LineTotals {
    let amount: rust_decimal::Decimal = lines
        .iter()
        .map(|l| to_decimal(l.price.unwrap_or(0.0)) * rust_decimal::Decimal::from(l.quantity))
        .sum();
    LineTotals {
        amount: to_f64(amount),
        units: lines.iter().map(|l| l.quantity).sum(),
    }
}

/// Validate an order line edit before `PUT /pedido/{id}/productos`
pub fn validate_lines(lines: &[OrderLine]) -> AppResult<()> {
    if lines.is_empty() {
        return Err(AppError::new(ErrorCode::OrderEmpty));
    }
    if let Some(bad) = lines.iter().find(|l| l.id <= 0 || l.quantity <= 0) {
        return Err(AppError::with_message(
            ErrorCode::OrderLinesInvalid,
            format!("Line for product {} has quantity {}", bad.id, bad.quantity),
        ));
    }
    Ok(())
}

/// Build the delivery confirmation body; the responsible name is required
pub fn delivery_confirmation(responsible: &str) -> AppResult<DeliveryUpdate> {
    let responsable = responsible.trim();
    if responsable.is_empty() {
        return Err(AppError::new(ErrorCode::DeliveryResponsibleRequired));
    }
    Ok(DeliveryUpdate {
        estado_entrega: DeliveryStatus::Delivered,
        responsable: responsable.to_string(),
    })
}

/// Merge a delivery confirmation into the local order
pub fn apply_delivery(order: &mut Order, update: &DeliveryUpdate) {
    order.estado_entrega = update.estado_entrega;
    order.responsable_entrega = Some(update.responsable.clone());
}

/// Sales figures of one commercial
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct CommercialSummary {
    pub orders: usize,
    pub sold: f64,
    /// Sold over paid invoices only
    pub collected: f64,
    pub commission: f64,
    pub commission_collected: f64,
}

/// Summarize a commercial's orders for a calendar month (1-12) or all
pub fn commercial_summary(orders: &[Order], month: Option<u32>) -> CommercialSummary {
    let selected: Vec<&Order> = orders
        .iter()
        .filter(|o| month.is_none_or(|m| o.date().map(|d| d.month()) == Some(m)))
        .collect();
    let totals = sales_totals(selected.iter().copied());
    let rate = to_decimal(COMMISSION_RATE);
    CommercialSummary {
        orders: selected.len(),
        sold: totals.total,
        collected: totals.paid,
        commission: to_f64(to_decimal(totals.total) * rate),
        commission_collected: to_f64(to_decimal(totals.paid) * rate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn order(id: i64, fecha: &str, estado: &str, entrega: &str, total: f64, lines: &str) -> Order {
        serde_json::from_value(json!({
            "id": id,
            "fecha_hora": fecha,
            "estado": estado,
            "estado_entrega": entrega,
            "total_productos": total,
            "productos": lines,
        }))
        .unwrap()
    }

    fn sample() -> Vec<Order> {
        vec![
            order(1, "2024-05-03 10:00:00", "Pedido Recibido", "Pendiente", 100.0,
                r#"[{"id": 1, "name": "Ron", "quantity": 2, "price": 30}, {"id": 2, "quantity": 1, "price": 40}]"#),
            order(2, "2024-06-01 08:00:00", "Pedido Facturado", "Pendiente", 200.0,
                r#"[{"id": 1, "name": "Ron", "quantity": 5}]"#),
            order(3, "2024-06-15 18:30:00", "Factura Pagada", "Entregado", 300.0,
                r#"[{"id": 1, "name": "Ron", "quantity": 50}]"#),
        ]
    }

    #[test]
    fn test_filter_and_sort() {
        let orders = sample();
        let all = OrderFilter::default().apply(&orders);
        let ids: Vec<i64> = all.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);

        let june = OrderFilter {
            month: Some("2024-06".into()),
            ..Default::default()
        };
        assert_eq!(june.apply(&orders).len(), 2);

        let day = OrderFilter {
            date: NaiveDate::from_ymd_opt(2024, 5, 3),
            ..Default::default()
        };
        assert_eq!(day.apply(&orders)[0].id, 1);
        assert_eq!(order_months(&orders), vec!["2024-05", "2024-06"]);
    }

    #[test]
    fn test_sales_totals() {
        let orders = sample();
        let t = sales_totals(&orders);
        assert_eq!(t.total, 600.0);
        assert_eq!(t.received, 100.0);
        assert_eq!(t.invoiced, 200.0);
        assert_eq!(t.paid, 300.0);
    }

    #[test]
    fn test_pending_dispatch() {
        let names = BTreeMap::from([(2, "Vino".to_string())]);
        let totals = pending_dispatch(&sample(), &names).unwrap();
        assert_eq!(totals.get("Ron"), Some(&7));
        assert_eq!(totals.get("Vino"), Some(&1));
        assert_eq!(totals.len(), 2);
    }

    #[test]
    fn test_line_totals() {
        let lines = sample()[0].lines().unwrap();
        assert_eq!(line_totals(&lines), LineTotals { amount: 100.0, units: 3 });
    }

    #[test]
    fn test_validate_lines() {
        assert_eq!(validate_lines(&[]).unwrap_err().code, ErrorCode::OrderEmpty);
        let bad = OrderLine { id: 1, name: None, quantity: 0, price: None };
        assert_eq!(validate_lines(&[bad]).unwrap_err().code, ErrorCode::OrderLinesInvalid);
    }

    #[test]
    fn test_delivery_confirmation() {
        assert_eq!(
            delivery_confirmation("  ").unwrap_err().code,
            ErrorCode::DeliveryResponsibleRequired
        );
        let update = delivery_confirmation(" Pedro ").unwrap();
        let mut o = sample().remove(0);
        apply_delivery(&mut o, &update);
        assert_eq!(o.estado_entrega, DeliveryStatus::Delivered);
        assert_eq!(o.responsable_entrega.as_deref(), Some("Pedro"));
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"estado_entrega": "Entregado", "responsable": "Pedro"})
        );
    }

    #[test]
    fn test_commercial_summary() {
        let orders = sample();
        let june = commercial_summary(&orders, Some(6));
        assert_eq!(june.orders, 2);
        assert_eq!(june.sold, 500.0);
        assert_eq!(june.collected, 300.0);
        assert_eq!(june.commission, 50.0);
        assert_eq!(june.commission_collected, 30.0);

        assert_eq!(commercial_summary(&orders, None).sold, 600.0);
    }
}
