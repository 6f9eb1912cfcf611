//! panel — terminal front-end for the dashboard backend
//!
//! Reads `.env`, sets up logging, logs in when credentials are given and
//! runs one subcommand against the backend.

mod args;
mod commands;
mod logger;

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use panel_client::{AppError, ClientConfig, ClientError, ErrorCode, PanelClient};
use shared::models::{ExpenseStatus, MovementKind, OrderStatus};

#[derive(Debug, Parser)]
#[command(name = "panel", version, about = "Dashboard backend client")]
struct Cli {
    /// Backend base URL (default: PANEL_BACKEND_URL or http://localhost:5000)
    #[arg(long)]
    backend_url: Option<String>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log in with this user before running the command
    #[arg(long, env = "PANEL_USER")]
    user: Option<String>,

    #[arg(long, env = "PANEL_PASSWORD", hide_env_values = true)]
    password: Option<String>,

    #[arg(long, env = "PANEL_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Emit logs as JSON lines
    #[arg(long, env = "PANEL_LOG_JSON")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Log in and print the token pair as environment lines
    Login,
    /// Stock per product, low-stock alerts and valuation
    Stock {
        /// Restrict to one warehouse
        #[arg(long)]
        warehouse: Option<i64>,
        /// Case-insensitive name filter
        #[arg(long)]
        search: Option<String>,
    },
    /// Set the stock of one product in one warehouse
    SetStock {
        #[arg(long)]
        product: i64,
        #[arg(long)]
        warehouse: i64,
        #[arg(long)]
        quantity: i64,
    },
    /// Create a warehouse
    CreateWarehouse { name: String },
    /// Accounts receivable (cartera)
    Receivables {
        /// Only orders placed on this date (YYYY-MM-DD)
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, value_parser = args::parse_order_status)]
        status: Option<OrderStatus>,
    },
    /// Sales totals
    Sales {
        /// Month filter (YYYY-MM)
        #[arg(long)]
        month: Option<String>,
    },
    /// Units pending dispatch per product
    Dispatch,
    /// Confirm delivery of an order
    Deliver {
        #[arg(long)]
        order: i64,
        #[arg(long)]
        responsible: String,
    },
    /// Upload the invoice of an order
    Invoice {
        #[arg(long)]
        order: i64,
        file: PathBuf,
    },
    /// Upload the payment receipt of an order
    Receipt {
        #[arg(long)]
        order: i64,
        file: PathBuf,
    },
    /// Sales and commission of one commercial
    Commercial {
        id: i64,
        /// Calendar month (1-12)
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
    },
    /// Expenses with filters and total
    Expenses {
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=12))]
        month: Option<u32>,
        #[arg(long)]
        year: Option<i32>,
        #[arg(long = "type")]
        tipo: Option<String>,
        #[arg(long, value_parser = args::parse_expense_status)]
        status: Option<ExpenseStatus>,
    },
    /// Approve an expense
    ApproveExpense {
        id: i64,
        #[arg(long, env = "PANEL_APPROVAL_PASSWORD", hide_env_values = true)]
        approval_password: String,
    },
    /// Clients with spending statistics
    Clients {
        #[arg(long, default_value_t = 1)]
        page: u32,
        #[arg(long, default_value_t = 20)]
        per_page: u32,
        /// Sort by average ticket instead of total spent
        #[arg(long)]
        by_ticket: bool,
        #[arg(long)]
        ascending: bool,
        /// Name filter over the fetched page
        #[arg(long)]
        search: Option<String>,
    },
    /// Bulk-import clients from a spreadsheet
    ImportClients { file: PathBuf },
    /// Price list table for one list
    PriceList { id: i64 },
    /// Inventory counts
    #[command(subcommand)]
    Count(CountCommand),
    /// Record a stock movement
    Movement {
        /// entrada, salida or traslado
        kind: MovementKind,
        /// Warehouse for entrada / salida
        #[arg(long)]
        warehouse: Option<i64>,
        /// Origin and destination for traslado
        #[arg(long)]
        from: Option<i64>,
        #[arg(long)]
        to: Option<i64>,
        #[arg(long, default_value = "")]
        comment: String,
        /// PRODUCT_ID=QTY, repeatable
        #[arg(long = "item", value_parser = args::parse_item, required = true)]
        items: Vec<(i64, i64)>,
    },
}

#[derive(Debug, Subcommand)]
enum CountCommand {
    /// Executed counts
    Records,
    /// Reconcile manual counts against recorded stock and submit them
    Run {
        #[arg(long)]
        warehouse: i64,
        #[arg(long)]
        responsible: String,
        /// JSON object of product id to counted units
        counts: PathBuf,
        /// Only print the reconciliation
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env file
    let _ = dotenvy::dotenv();

    let cli = Cli::parse();
    logger::init_logger(&cli.log_level, cli.log_json)?;

    let mut config = ClientConfig::from_env();
    if let Some(url) = &cli.backend_url {
        config.base_url = url.clone();
    }
    if let Some(timeout) = cli.timeout {
        config = config.with_timeout(timeout);
    }
    tracing::debug!(backend = %config.normalized_base_url(), "Starting panel");

    let client = PanelClient::new(&config)?;
    if let (Some(user), Some(password)) = (&cli.user, &cli.password) {
        client.login(user, password).await?;
    }

    if let Err(e) = commands::run(&client, cli.command, cli.user.as_deref()).await {
        match error_code(&e) {
            Some(code) => tracing::error!(
                error = %e,
                code = %code,
                category = code.category().name(),
                "Command failed"
            ),
            None => tracing::error!(error = %e, "Command failed"),
        }
        return Err(e);
    }
    Ok(())
}

/// Structured code of a failed command, when it carries one
fn error_code(err: &anyhow::Error) -> Option<ErrorCode> {
    err.downcast_ref::<ClientError>()
        .map(ClientError::code)
        .or_else(|| err.downcast_ref::<AppError>().map(|e| e.code))
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_error_code_through_context() {
        let err = Err::<(), _>(ClientError::SessionExpired)
            .context("listing orders")
            .unwrap_err();
        let code = error_code(&err).unwrap();
        assert_eq!(code, ErrorCode::SessionExpired);
        assert_eq!(code.category().name(), "auth");

        let err = anyhow::Error::from(AppError::new(ErrorCode::CountIncomplete));
        assert_eq!(
            error_code(&err).map(|c| c.category().name()),
            Some("inventory")
        );

        assert_eq!(error_code(&anyhow::anyhow!("plain")), None);
    }
}
