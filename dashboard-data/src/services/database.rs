//! Database service for dashboard-data.
//!
//! Every query binds its inputs and runs under the configured query timeout.
//! Search terms are matched literally (see [`crate::utils::pattern`]).

use crate::error::DataError;
use crate::models::{
    CustomerField, CustomerSummaryRecord, CustomerSummaryRow, InvoiceForm, InvoiceFormRecord,
    InvoiceStatus, InvoicesTableRow,
};
use crate::services::metrics::DB_QUERY_DURATION;
use crate::utils::contains_pattern;
use dashboard_core::error::AppError;
use sqlx::postgres::{PgPool, PgPoolOptions};
use std::future::Future;
use std::time::Duration;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Shared `WHERE` clause for invoice search; `$1` is the escaped pattern.
const INVOICE_SEARCH_PREDICATE: &str = r#"
    customers.name ILIKE $1 ESCAPE '\' OR
    customers.email ILIKE $1 ESCAPE '\' OR
    invoices.amount::text ILIKE $1 ESCAPE '\' OR
    invoices.date::text ILIKE $1 ESCAPE '\' OR
    invoices.status ILIKE $1 ESCAPE '\'
"#;

/// Offset of a 1-indexed page. Pages below 1 read as page 1.
pub fn page_offset(page: i64, page_size: i64) -> i64 {
    (page.max(1) - 1).saturating_mul(page_size.max(1))
}

/// Number of pages needed for `total` rows.
pub fn page_count(total: i64, page_size: i64) -> i64 {
    let total = total.max(0);
    let page_size = page_size.max(1);
    total / page_size + i64::from(total % page_size != 0)
}

/// Database connection pool wrapper.
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
    query_timeout: Duration,
}

impl Database {
    /// Create a new database connection pool.
    #[instrument(skip(database_url), fields(service = "dashboard-data"))]
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        query_timeout: Duration,
    ) -> Result<Self, AppError> {
        info!(
            max_connections = max_connections,
            min_connections = min_connections,
            "Connecting to PostgreSQL"
        );

        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(query_timeout)
            .idle_timeout(Duration::from_secs(600))
            .connect(database_url)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Failed to connect: {}", e)))?;

        info!("PostgreSQL connection pool established");

        Ok(Self::from_pool(pool, query_timeout))
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool, query_timeout: Duration) -> Self {
        Self {
            pool,
            query_timeout,
        }
    }

    /// Get a reference to the connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Run database migrations.
    #[instrument(skip(self))]
    pub async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations");
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| AppError::DatabaseError(anyhow::anyhow!("Migration failed: {}", e)))?;
        info!("Database migrations completed");
        Ok(())
    }

    /// Time `query` and bound it by the query timeout.
    async fn run<T, F>(&self, operation: &'static str, query: F) -> Result<T, DataError>
    where
        F: Future<Output = Result<T, sqlx::Error>>,
    {
        let timer = DB_QUERY_DURATION
            .with_label_values(&[operation])
            .start_timer();

        let result = tokio::time::timeout(self.query_timeout, query).await;

        timer.observe_duration();

        match result {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(sqlx::Error::PoolTimedOut)) | Err(_) => Err(DataError::QueryTimeout {
                operation,
                timeout: self.query_timeout,
            }),
            Ok(Err(e)) => Err(DataError::QueryFailure(anyhow::anyhow!(
                "Failed to {}: {}",
                operation.replace('_', " "),
                e
            ))),
        }
    }

    // -------------------------------------------------------------------------
    // Invoice Operations
    // -------------------------------------------------------------------------

    /// One page of invoices matching `query`, newest first.
    #[instrument(skip(self))]
    pub async fn filtered_invoices(
        &self,
        query: &str,
        page: i64,
        page_size: i64,
    ) -> Result<Vec<InvoicesTableRow>, DataError> {
        let limit = page_size.max(1);
        let offset = page_offset(page, limit);
        let sql = format!(
            r#"
            SELECT
              invoices.id,
              invoices.amount,
              invoices.date,
              invoices.status,
              customers.name,
              customers.email,
              customers.image_url
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE {}
            ORDER BY invoices.date DESC, invoices.id
            LIMIT $2 OFFSET $3
            "#,
            INVOICE_SEARCH_PREDICATE
        );

        let rows = self
            .run(
                "filtered_invoices",
                sqlx::query_as::<_, InvoicesTableRow>(&sql)
                    .bind(contains_pattern(query))
                    .bind(limit)
                    .bind(offset)
                    .fetch_all(&self.pool),
            )
            .await?;

        debug!(count = rows.len(), offset = offset, "Fetched invoice page");

        Ok(rows)
    }

    /// Number of pages of invoices matching `query`.
    #[instrument(skip(self))]
    pub async fn invoice_page_count(&self, query: &str, page_size: i64) -> Result<i64, DataError> {
        let sql = format!(
            r#"
            SELECT COUNT(*)
            FROM invoices
            JOIN customers ON invoices.customer_id = customers.id
            WHERE {}
            "#,
            INVOICE_SEARCH_PREDICATE
        );

        let total: i64 = self
            .run(
                "count_invoices",
                sqlx::query_scalar::<_, i64>(&sql)
                    .bind(contains_pattern(query))
                    .fetch_one(&self.pool),
            )
            .await?;

        Ok(page_count(total, page_size))
    }

    /// Invoice form data, or `None` when no invoice has this id.
    #[instrument(skip(self))]
    pub async fn invoice_by_id(&self, id: &str) -> Result<Option<InvoiceForm>, DataError> {
        // A malformed id cannot name a stored invoice.
        let Ok(invoice_id) = Uuid::parse_str(id) else {
            debug!("Invoice id is not a UUID");
            return Ok(None);
        };

        let record = self
            .run(
                "get_invoice",
                sqlx::query_as::<_, InvoiceFormRecord>(
                    r#"
                    SELECT
                      invoices.id,
                      invoices.customer_id,
                      invoices.amount,
                      invoices.status
                    FROM invoices
                    WHERE invoices.id = $1
                    "#,
                )
                .bind(invoice_id)
                .fetch_optional(&self.pool),
            )
            .await?;

        Ok(record.map(InvoiceForm::from))
    }

    // -------------------------------------------------------------------------
    // Customer Operations
    // -------------------------------------------------------------------------

    /// All customers by name.
    #[instrument(skip(self))]
    pub async fn all_customer_names(&self) -> Result<Vec<CustomerField>, DataError> {
        self.run(
            "list_customers",
            sqlx::query_as::<_, CustomerField>(
                r#"
                SELECT
                  id,
                  name
                FROM customers
                ORDER BY name ASC
                "#,
            )
            .fetch_all(&self.pool),
        )
        .await
    }

    /// Customers matching `query` by name or email, with invoice totals.
    #[instrument(skip(self))]
    pub async fn filtered_customer_summaries(
        &self,
        query: &str,
    ) -> Result<Vec<CustomerSummaryRow>, DataError> {
        let records = self
            .run(
                "filtered_customers",
                sqlx::query_as::<_, CustomerSummaryRecord>(
                    r#"
                    SELECT
                      customers.id,
                      customers.name,
                      customers.email,
                      customers.image_url,
                      COUNT(invoices.id) AS total_invoices,
                      COALESCE(SUM(CASE WHEN invoices.status = $2 THEN invoices.amount ELSE 0 END), 0)::BIGINT AS total_pending,
                      COALESCE(SUM(CASE WHEN invoices.status = $3 THEN invoices.amount ELSE 0 END), 0)::BIGINT AS total_paid
                    FROM customers
                    LEFT JOIN invoices ON customers.id = invoices.customer_id
                    WHERE
                      customers.name ILIKE $1 ESCAPE '\' OR
                      customers.email ILIKE $1 ESCAPE '\'
                    GROUP BY customers.id, customers.name, customers.email, customers.image_url
                    ORDER BY customers.name ASC
                    "#,
                )
                .bind(contains_pattern(query))
                .bind(InvoiceStatus::Pending.as_str())
                .bind(InvoiceStatus::Paid.as_str())
                .fetch_all(&self.pool),
            )
            .await?;

        Ok(records.into_iter().map(CustomerSummaryRow::from).collect())
    }
}
