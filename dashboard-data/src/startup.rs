//! Wiring of the pool, data source client and dashboard handle.

use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::services::{init_metrics, Database, FetchClient};
use dashboard_core::error::AppError;
use std::sync::Arc;

/// Build the dashboard, applying migrations when the configuration asks for it.
pub async fn build_dashboard(config: &DashboardConfig) -> Result<Dashboard, AppError> {
    build_internal(config, config.database.run_migrations).await
}

/// Build the dashboard without running migrations.
/// Use this in tests when the schema is managed by the test harness.
pub async fn build_dashboard_without_migrations(
    config: &DashboardConfig,
) -> Result<Dashboard, AppError> {
    build_internal(config, false).await
}

async fn build_internal(
    config: &DashboardConfig,
    run_migrations: bool,
) -> Result<Dashboard, AppError> {
    init_metrics();

    let db = Database::new(
        &config.database.url,
        config.database.max_connections,
        config.database.min_connections,
        config.database.query_timeout(),
    )
    .await
    .map_err(|e| {
        tracing::error!(error = %e, "Failed to connect to PostgreSQL");
        e
    })?;

    if run_migrations {
        db.run_migrations().await.map_err(|e| {
            tracing::error!(error = %e, "Failed to run migrations");
            e
        })?;
    }

    let fetcher = FetchClient::new(&config.data_source.base_url, config.data_source.timeout())?;

    tracing::info!(
        data_source = %fetcher.base_url(),
        items_per_page = config.pagination.items_per_page,
        "Dashboard data layer ready"
    );

    Ok(Dashboard::new(
        Arc::new(db),
        Arc::new(fetcher),
        config.pagination,
    ))
}
