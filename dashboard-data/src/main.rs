//! Dashboard data snapshot.
//!
//! Usage: `dashboard-data [QUERY]`. Prints revenue, latest invoices, card
//! figures and the first page of the invoice search for `QUERY` as JSON.

use dashboard_core::observability::{init_tracing, shutdown_tracing};
use dashboard_data::config::DashboardConfig;
use dashboard_data::models::{CardData, InvoicesTableRow, LatestInvoice, Revenue};
use dashboard_data::startup::build_dashboard;
use dashboard_data::utils::{format_currency, format_date_to_local};
use serde::Serialize;

#[derive(Serialize)]
struct Snapshot {
    revenue: Vec<Revenue>,
    latest_invoices: Vec<LatestInvoice>,
    card_data: CardData,
    query: String,
    invoices: Vec<InvoiceLine>,
    total_pages: i64,
}

/// Invoice table row as displayed: formatted amount and date.
#[derive(Serialize)]
struct InvoiceLine {
    id: String,
    name: String,
    email: String,
    amount: String,
    date: String,
    status: String,
}

impl From<InvoicesTableRow> for InvoiceLine {
    fn from(row: InvoicesTableRow) -> Self {
        Self {
            id: row.id.to_string(),
            name: row.name,
            email: row.email,
            amount: format_currency(row.amount),
            date: format_date_to_local(row.date),
            status: row.status,
        }
    }
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Load configuration
    let config = DashboardConfig::load().map_err(|e| {
        eprintln!("Failed to load configuration: {}", e);
        std::io::Error::other(format!("Configuration error: {}", e))
    })?;

    init_tracing(
        &config.service_name,
        &config.log_level,
        config.otlp_endpoint.as_deref(),
    );

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        service_name = %config.service_name,
        db_max_connections = %config.database.max_connections,
        data_source = %config.data_source.base_url,
        "Starting dashboard-data"
    );

    let query = std::env::args().nth(1).unwrap_or_default();
    let result = snapshot(&config, query).await;

    shutdown_tracing();

    let snapshot = result?;
    let json = serde_json::to_string_pretty(&snapshot).map_err(std::io::Error::other)?;
    println!("{}", json);
    Ok(())
}

async fn snapshot(config: &DashboardConfig, query: String) -> std::io::Result<Snapshot> {
    let dashboard = build_dashboard(config).await.map_err(|e| {
        tracing::error!(error = %e, "Failed to build dashboard");
        std::io::Error::other(format!("Startup error: {}", e))
    })?;

    let (revenue, latest_invoices, card_data, invoices, total_pages) = tokio::try_join!(
        dashboard.fetch_revenue(),
        dashboard.fetch_latest_invoices(),
        dashboard.fetch_card_data(),
        dashboard.fetch_filtered_invoices(&query, 1),
        dashboard.fetch_invoices_pages(&query),
    )
    .map_err(std::io::Error::other)?;

    Ok(Snapshot {
        revenue,
        latest_invoices,
        card_data,
        query,
        invoices: invoices.into_iter().map(InvoiceLine::from).collect(),
        total_pages,
    })
}
