//! Subcommand handlers

use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, anyhow, bail};
use chrono::Local;
use panel_client::{PanelClient, Upload};
use shared::clients::{self, ClientStat, SortOrder};
use shared::error::{AppError, ErrorCode};
use shared::expenses::{self, ExpenseFilter};
use shared::inventory::{self, Reconciliation, stock};
use shared::models::{MovementKind, Order, Product, StockMovement};
use shared::money::format_cop;
use shared::pricing;
use shared::receivables::{self, ReceivableFilter};
use shared::sales::{self, OrderFilter};

use crate::{Command, CountCommand, args};

pub async fn run(client: &PanelClient, command: Command, user: Option<&str>) -> anyhow::Result<()> {
    match command {
        Command::Login => login(client).await,
        Command::Stock { warehouse, search } => {
            stock_overview(client, warehouse, search.as_deref()).await
        }
        Command::SetStock {
            product,
            warehouse,
            quantity,
        } => {
            let mut products = client.list_products().await?;
            let product = products
                .iter_mut()
                .find(|p| p.id == product)
                .ok_or_else(|| AppError::new(ErrorCode::ProductNotFound).with_detail("id", product))?;
            let stock = client.set_stock(product, warehouse, quantity).await?;
            println!("{}: {} units in warehouse {}", product.nombre, stock, warehouse);
            Ok(())
        }
        Command::CreateWarehouse { name } => {
            let w = client.create_warehouse(&name).await?;
            println!("Created warehouse {} ({})", w.nombre, w.id);
            Ok(())
        }
        Command::Receivables { date, status } => {
            let orders = client.list_orders().await?;
            let now = Local::now().naive_local();
            let rows = receivables::listing(&orders, &ReceivableFilter { date, status }, now);
            if rows.is_empty() && date.is_some() {
                let dates: Vec<String> = receivables::order_dates(&orders)
                    .iter()
                    .map(|d| d.to_string())
                    .collect();
                println!("No orders on that date. Order dates: {}", dates.join(", "));
            }
            for row in rows {
                println!(
                    "#{:<6} {:<30} {:>16} {:<18} {:>5} {}",
                    row.order_id,
                    row.client,
                    format_cop(row.total),
                    row.status.label(),
                    row.days_to_due.map(|d| d.to_string()).unwrap_or_else(|| "-".into()),
                    row.bucket.map(|b| format!("{:?}", b)).unwrap_or_default(),
                );
            }
            let totals = receivables::totals(&orders, now);
            println!(
                "Due soon: {}  Overdue: {}  Paid: {}",
                format_cop(totals.due_soon),
                format_cop(totals.overdue),
                format_cop(totals.paid)
            );
            Ok(())
        }
        Command::Sales { month } => {
            let orders = client.list_orders().await?;
            let filter = OrderFilter {
                month,
                ..Default::default()
            };
            let selected = filter.apply(&orders);
            let totals = sales::sales_totals(selected.iter().copied());
            println!("Orders:   {}", selected.len());
            println!("Total:    {}", format_cop(totals.total));
            println!("Received: {}", format_cop(totals.received));
            println!("Invoiced: {}", format_cop(totals.invoiced));
            println!("Paid:     {}", format_cop(totals.paid));
            println!("Months:   {}", sales::order_months(&orders).join(", "));
            Ok(())
        }
        Command::Dispatch => {
            let orders = client.list_orders().await?;
            let names: BTreeMap<i64, String> = client
                .list_products()
                .await?
                .into_iter()
                .map(|p| (p.id, p.nombre))
                .collect();
            let pending = sales::pending_dispatch(&orders, &names)?;
            if pending.is_empty() {
                println!("Nothing pending dispatch");
            }
            for (name, units) in pending {
                println!("{:<40} {:>6}", name, units);
            }
            Ok(())
        }
        Command::Deliver { order, responsible } => {
            let mut order = find_order(client, order).await?;
            let message = client.confirm_delivery(&mut order, &responsible).await?;
            println!(
                "{}",
                message.unwrap_or_else(|| format!("Order {} delivered", order.id))
            );
            Ok(())
        }
        Command::Invoice { order, file } => {
            let mut order = find_order(client, order).await?;
            let upload = Upload::from_path("factura", &file).await?;
            client.upload_invoice(&mut order, upload).await?;
            println!(
                "Order {} is now {} ({})",
                order.id,
                order.estado,
                order.factura_url.as_deref().unwrap_or("-")
            );
            Ok(())
        }
        Command::Receipt { order, file } => {
            let mut order = find_order(client, order).await?;
            let upload = Upload::from_path("recibo", &file).await?;
            client.upload_receipt(&mut order, upload).await?;
            println!(
                "Order {} is now {} ({})",
                order.id,
                order.estado,
                order.recibo_url.as_deref().unwrap_or("-")
            );
            Ok(())
        }
        Command::Commercial { id, month } => {
            let orders = client.commercial_orders(id).await?;
            let summary = sales::commercial_summary(&orders, month);
            println!("Orders:               {}", summary.orders);
            println!("Sold:                 {}", format_cop(summary.sold));
            println!("Collected:            {}", format_cop(summary.collected));
            println!("Commission:           {}", format_cop(summary.commission));
            println!("Commission collected: {}", format_cop(summary.commission_collected));
            Ok(())
        }
        Command::Expenses {
            month,
            year,
            tipo,
            status,
        } => {
            let all = client.list_expenses().await?;
            let filter = ExpenseFilter {
                month,
                year,
                tipo_gasto: tipo,
                status,
            };
            let selected = filter.apply(&all);
            for e in &selected {
                println!(
                    "#{:<5} {:<10} {:<20} {:>14} {}",
                    e.id,
                    e.fecha,
                    e.tipo_gasto,
                    format_cop(e.monto),
                    e.status.label()
                );
            }
            println!("Total: {}", format_cop(expenses::total(selected)));
            println!("Types: {}", expenses::expense_types(&all).join(", "));
            Ok(())
        }
        Command::ApproveExpense {
            id,
            approval_password,
        } => {
            let expense = client.approve_expense(id, &approval_password).await?;
            println!("Expense {} is {}", expense.id, expense.status.label());
            Ok(())
        }
        Command::Clients {
            page,
            per_page,
            by_ticket,
            ascending,
            search,
        } => {
            let (mut rows, total) = client.client_rows(page, per_page).await?;
            let stat = if by_ticket {
                ClientStat::AverageTicket
            } else {
                ClientStat::TotalSpent
            };
            let order = if ascending {
                SortOrder::Asc
            } else {
                SortOrder::Desc
            };
            clients::sort_by_stat(&mut rows, stat, order);
            for row in clients::search(&rows, search.as_deref().unwrap_or_default()) {
                println!(
                    "#{:<5} {:<30} {:>16} {:>16}",
                    row.client.id,
                    row.client.nombre,
                    format_cop(row.total_spent),
                    format_cop(row.average_ticket)
                );
            }
            println!("Page {} ({} clients in total)", page, total);
            Ok(())
        }
        Command::ImportClients { file } => {
            let upload = Upload::from_path("archivo", &file).await?;
            let result = client.import_clients(upload).await?;
            if let Some(msg) = &result.mensaje {
                println!("{}", msg);
            }
            for err in &result.errores {
                eprintln!("  {}", err);
            }
            Ok(())
        }
        Command::PriceList { id } => {
            let list = client
                .list_price_lists()
                .await?
                .into_iter()
                .find(|l| l.id == id)
                .ok_or_else(|| AppError::new(ErrorCode::PriceListNotFound).with_detail("id", id))?;
            let products = client.list_products().await?;
            println!("{} (-{}%)", list.nombre, list.descuento);
            for row in pricing::price_list_table(&products, &list) {
                println!(
                    "{:<40} {:>14} {:>14} {:>12} {:>12} {:>14}",
                    row.product_name,
                    format_cop(row.base),
                    format_cop(row.discounted),
                    format_cop(row.iva),
                    format_cop(row.ipo),
                    format_cop(row.total)
                );
            }
            Ok(())
        }
        Command::Count(CountCommand::Records) => {
            let mut records = client.count_records().await?;
            inventory::records::sort_newest_first(&mut records);
            for r in &records {
                println!(
                    "#{:<5} {:<20} {:<20} {:<20} {:>+6}",
                    r.id,
                    r.fecha_ejecucion,
                    r.bodega_nombre,
                    r.responsable,
                    r.total_difference()
                );
            }
            let summary = inventory::summarize_records(&records);
            println!(
                "{} counts, {} correct, {} with discrepancies",
                summary.total, summary.ok, summary.with_discrepancies
            );
            Ok(())
        }
        Command::Count(CountCommand::Run {
            warehouse,
            responsible,
            counts,
            dry_run,
        }) => run_count(client, warehouse, &responsible, &counts, dry_run).await,
        Command::Movement {
            kind,
            warehouse,
            from,
            to,
            comment,
            items,
        } => {
            let changes: BTreeMap<i64, i64> = items.into_iter().collect();
            let movement = match kind {
                MovementKind::Entrada => StockMovement::entrada(
                    warehouse.ok_or_else(|| anyhow!("--warehouse is required for entrada"))?,
                    changes,
                    comment,
                ),
                MovementKind::Salida => StockMovement::salida(
                    warehouse.ok_or_else(|| anyhow!("--warehouse is required for salida"))?,
                    changes,
                    comment,
                ),
                MovementKind::Traslado => match (from, to) {
                    (Some(from), Some(to)) => StockMovement::traslado(from, to, changes, comment),
                    _ => bail!("--from and --to are required for traslado"),
                },
            };
            let movement = match user {
                Some(user) => movement.with_user(user),
                None => movement,
            };
            let response = client.record_movement(&movement).await?;
            println!("{}", response.mensaje);
            Ok(())
        }
    }
}

async fn login(client: &PanelClient) -> anyhow::Result<()> {
    let session = client.session().snapshot().await;
    let (Some(access), Some(refresh)) = (session.access_token, session.refresh_token) else {
        bail!("not logged in: pass --user and --password (or PANEL_USER / PANEL_PASSWORD)");
    };
    println!("PANEL_ACCESS_TOKEN={}", access);
    println!("PANEL_REFRESH_TOKEN={}", refresh);
    Ok(())
}

async fn find_order(client: &PanelClient, id: i64) -> anyhow::Result<Order> {
    client
        .list_orders()
        .await?
        .into_iter()
        .find(|o| o.id == id)
        .ok_or_else(|| AppError::new(ErrorCode::OrderNotFound).with_detail("id", id).into())
}

async fn stock_overview(
    client: &PanelClient,
    only: Option<i64>,
    search: Option<&str>,
) -> anyhow::Result<()> {
    let products = client.list_products().await?;
    let warehouses = client.list_warehouses().await?;
    if let Some(id) = only
        && !warehouses.iter().any(|w| w.id == id)
    {
        return Err(AppError::new(ErrorCode::WarehouseNotFound)
            .with_detail("id", id)
            .into());
    }

    let shown = stock::search(&products, search.unwrap_or_default());
    for p in &shown {
        let units = match only {
            Some(id) => p.stock_in(id),
            None => stock::total_stock(p, &warehouses),
        };
        println!("#{:<5} {:<40} {:>8}", p.id, p.nombre, units);
    }

    for w in warehouses.iter().filter(|w| only.is_none_or(|id| id == w.id)) {
        let low = stock::low_stock(&products, w);
        if !low.is_empty() {
            let names: Vec<&str> = low.iter().map(|p| p.nombre.as_str()).collect();
            println!(
                "Low stock in {} (<= {}): {}",
                w.nombre,
                w.low_stock_threshold,
                names.join(", ")
            );
        }
    }

    let value = stock::valuation(&products, &warehouses, only);
    println!(
        "{} units, {} at cost, {} at sale price",
        value.units,
        format_cop(value.at_cost),
        format_cop(value.at_sale_price)
    );
    Ok(())
}

/// Build a count session from the counts file
///
/// Products the file does not list keep the 0 they get on warehouse
/// selection.
fn reconcile(
    products: Vec<Product>,
    warehouse: i64,
    responsible: &str,
    manual: BTreeMap<i64, Option<i64>>,
    source: &Path,
) -> anyhow::Result<Reconciliation> {
    let mut count = Reconciliation::new(products);
    count.select_warehouse(warehouse);
    for (product_id, units) in manual {
        count
            .set_count(product_id, units)
            .with_context(|| format!("product {} in {}", product_id, source.display()))?;
    }
    count.set_responsible(responsible);
    Ok(count)
}

async fn run_count(
    client: &PanelClient,
    warehouse: i64,
    responsible: &str,
    counts: &Path,
    dry_run: bool,
) -> anyhow::Result<()> {
    let manual = args::read_counts(counts)?;
    if !client.list_warehouses().await?.iter().any(|w| w.id == warehouse) {
        return Err(AppError::new(ErrorCode::WarehouseNotFound)
            .with_detail("id", warehouse)
            .into());
    }

    let count = reconcile(
        client.list_products().await?,
        warehouse,
        responsible,
        manual,
        counts,
    )?;

    let summary = count.summary();
    for line in &summary.lines {
        println!(
            "{:<40} {:>8} {:>8} {:>+6} {}",
            line.product_name,
            line.recorded,
            line.manual.map(|m| m.to_string()).unwrap_or_else(|| "-".into()),
            line.difference,
            line.treatment().label()
        );
    }
    println!(
        "Status: {}  Total difference: {:+}",
        summary
            .status
            .map(|s| format!("{:?}", s))
            .unwrap_or_else(|| "-".into()),
        summary.total_difference
    );

    if dry_run {
        return Ok(());
    }
    client.submit_count(&count).await?;
    println!("Count submitted");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: i64, nombre: &str, stock: i64) -> Product {
        Product {
            id,
            nombre: nombre.into(),
            stocks: [(5, stock)].into_iter().collect(),
            ..Default::default()
        }
    }

    #[test]
    fn test_unlisted_products_submit_zero() {
        let products = vec![product(1, "Ron", 10), product(2, "Gin", 3)];
        let manual = [(1, Some(10))].into_iter().collect();
        let count = reconcile(products, 5, "Carlos", manual, Path::new("conteo.json")).unwrap();

        let body = count.submission().unwrap();
        assert_eq!(body.inventario[&1].alerta, "equal");
        let gin = &body.inventario[&2];
        assert_eq!(gin.cantidad, 0);
        assert_eq!(gin.alerta, "less");
        assert_eq!(gin.diferencia, -3);
    }

    #[test]
    fn test_unknown_product_in_counts_file() {
        let manual = [(99, Some(1))].into_iter().collect();
        let err = reconcile(vec![product(1, "Ron", 10)], 5, "Carlos", manual, Path::new("conteo.json"))
            .unwrap_err();
        assert!(err.to_string().contains("product 99 in conteo.json"));
    }
}
