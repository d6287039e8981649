//! Public read operations of the dashboard.
//!
//! Each operation is all-or-nothing. Failures are logged and counted here,
//! then reduced to a [`DashboardError`] carrying only the operation and the
//! failure kind.

use crate::config::PaginationConfig;
use crate::error::{DashboardError, DataError, Operation};
use crate::models::{
    CardData, Customer, CustomerField, CustomerSummaryRow, Invoice, InvoiceForm,
    InvoicesTableRow, LatestInvoice, Revenue,
};
use crate::services::aggregate::{card_summary, latest_invoices};
use crate::services::metrics::{ERRORS_TOTAL, OPERATIONS_TOTAL};
use crate::services::{Database, FetchClient, Resource};
use std::future::Future;
use std::sync::Arc;
use tracing::{error, instrument};

/// Entry point for the dashboard's data. Cheap to clone; clones share the
/// connection pool and HTTP client.
#[derive(Clone)]
pub struct Dashboard {
    db: Arc<Database>,
    fetcher: Arc<FetchClient>,
    pagination: PaginationConfig,
}

impl Dashboard {
    pub fn new(db: Arc<Database>, fetcher: Arc<FetchClient>, pagination: PaginationConfig) -> Self {
        Self {
            db,
            fetcher,
            pagination,
        }
    }

    /// Monthly revenue for the chart.
    #[instrument(skip(self))]
    pub async fn fetch_revenue(&self) -> Result<Vec<Revenue>, DashboardError> {
        guard(Operation::Revenue, self.fetcher.fetch(Resource::Revenue)).await
    }

    /// Most recent invoices joined with their customers.
    #[instrument(skip(self))]
    pub async fn fetch_latest_invoices(&self) -> Result<Vec<LatestInvoice>, DashboardError> {
        guard(Operation::LatestInvoices, async {
            let (invoices, customers) = self.invoices_and_customers().await?;
            latest_invoices(
                &invoices,
                &customers,
                self.pagination.latest_invoices_limit,
            )
        })
        .await
    }

    /// Invoice and customer counts with paid/pending totals.
    #[instrument(skip(self))]
    pub async fn fetch_card_data(&self) -> Result<CardData, DashboardError> {
        guard(Operation::CardData, async {
            let (invoices, customers) = self.invoices_and_customers().await?;
            Ok(card_summary(&invoices, &customers))
        })
        .await
    }

    /// One page of the invoice search. Pages start at 1.
    #[instrument(skip(self))]
    pub async fn fetch_filtered_invoices(
        &self,
        query: &str,
        page: i64,
    ) -> Result<Vec<InvoicesTableRow>, DashboardError> {
        guard(
            Operation::FilteredInvoices,
            self.db
                .filtered_invoices(query, page, self.pagination.items_per_page),
        )
        .await
    }

    /// Number of pages in the invoice search.
    #[instrument(skip(self))]
    pub async fn fetch_invoices_pages(&self, query: &str) -> Result<i64, DashboardError> {
        guard(
            Operation::InvoicesPages,
            self.db
                .invoice_page_count(query, self.pagination.items_per_page),
        )
        .await
    }

    /// Invoice edit form, `None` when the id is unknown.
    #[instrument(skip(self))]
    pub async fn fetch_invoice_by_id(
        &self,
        id: &str,
    ) -> Result<Option<InvoiceForm>, DashboardError> {
        guard(Operation::InvoiceById, self.db.invoice_by_id(id)).await
    }

    /// All customers by name.
    #[instrument(skip(self))]
    pub async fn fetch_customers(&self) -> Result<Vec<CustomerField>, DashboardError> {
        guard(Operation::Customers, self.db.all_customer_names()).await
    }

    /// Customers table for the search `query`.
    #[instrument(skip(self))]
    pub async fn fetch_filtered_customers(
        &self,
        query: &str,
    ) -> Result<Vec<CustomerSummaryRow>, DashboardError> {
        guard(
            Operation::FilteredCustomers,
            self.db.filtered_customer_summaries(query),
        )
        .await
    }

    async fn invoices_and_customers(&self) -> Result<(Vec<Invoice>, Vec<Customer>), DataError> {
        tokio::try_join!(
            self.fetcher.fetch::<Invoice>(Resource::Invoices),
            self.fetcher.fetch::<Customer>(Resource::Customers),
        )
    }
}

/// Operation boundary: record the outcome and strip internal detail.
async fn guard<T, F>(operation: Operation, work: F) -> Result<T, DashboardError>
where
    F: Future<Output = Result<T, DataError>>,
{
    match work.await {
        Ok(value) => {
            OPERATIONS_TOTAL
                .with_label_values(&[operation.as_str(), "ok"])
                .inc();
            Ok(value)
        }
        Err(e) => {
            error!(
                operation = operation.as_str(),
                error_kind = e.kind().as_str(),
                error = %e,
                "Dashboard operation failed"
            );
            OPERATIONS_TOTAL
                .with_label_values(&[operation.as_str(), "error"])
                .inc();
            ERRORS_TOTAL.with_label_values(&[e.kind().as_str()]).inc();
            Err(DashboardError::new(operation, &e))
        }
    }
}
