//! Error taxonomy for dashboard operations.
//!
//! [`DataError`] carries the full internal detail and never leaves the crate's
//! operation boundary; callers only see [`DashboardError`], which pairs the
//! failing [`Operation`] with an [`ErrorKind`].

use crate::services::fetch_client::Resource;
use std::time::Duration;
use thiserror::Error;

/// Internal failure raised by the fetch, join and query layers.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("Failed to fetch {resource}: {source}")]
    FetchFailure {
        resource: Resource,
        source: anyhow::Error,
    },

    #[error("Customer not found for invoice ID: {invoice_id}")]
    MissingRelatedEntity { invoice_id: String },

    #[error("Query failed: {0}")]
    QueryFailure(anyhow::Error),

    #[error("Query '{operation}' timed out after {timeout:?}")]
    QueryTimeout {
        operation: &'static str,
        timeout: Duration,
    },
}

impl DataError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DataError::FetchFailure { .. } => ErrorKind::FetchFailure,
            DataError::MissingRelatedEntity { .. } => ErrorKind::MissingRelatedEntity,
            DataError::QueryFailure(_) => ErrorKind::QueryFailure,
            DataError::QueryTimeout { .. } => ErrorKind::QueryTimeout,
        }
    }
}

/// Failure category visible to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    FetchFailure,
    MissingRelatedEntity,
    QueryFailure,
    QueryTimeout,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::FetchFailure => "fetch_failure",
            ErrorKind::MissingRelatedEntity => "missing_related_entity",
            ErrorKind::QueryFailure => "query_failure",
            ErrorKind::QueryTimeout => "query_timeout",
        }
    }
}

/// Public dashboard operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Revenue,
    LatestInvoices,
    CardData,
    FilteredInvoices,
    InvoicesPages,
    InvoiceById,
    Customers,
    FilteredCustomers,
}

impl Operation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Operation::Revenue => "fetch_revenue",
            Operation::LatestInvoices => "fetch_latest_invoices",
            Operation::CardData => "fetch_card_data",
            Operation::FilteredInvoices => "fetch_filtered_invoices",
            Operation::InvoicesPages => "fetch_invoices_pages",
            Operation::InvoiceById => "fetch_invoice_by_id",
            Operation::Customers => "fetch_customers",
            Operation::FilteredCustomers => "fetch_filtered_customers",
        }
    }

    /// Caller-facing failure message.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Operation::Revenue => "Failed to fetch revenue data.",
            Operation::LatestInvoices => "Failed to fetch the latest invoices.",
            Operation::CardData => "Failed to fetch card data.",
            Operation::FilteredInvoices => "Failed to fetch invoices.",
            Operation::InvoicesPages => "Failed to fetch total number of invoices.",
            Operation::InvoiceById => "Failed to fetch invoice.",
            Operation::Customers => "Failed to fetch all customers.",
            Operation::FilteredCustomers => "Failed to fetch customer table.",
        }
    }
}

/// Error returned by every public dashboard operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("{}", .operation.failure_message())]
pub struct DashboardError {
    pub operation: Operation,
    pub kind: ErrorKind,
}

impl DashboardError {
    pub fn new(operation: Operation, cause: &DataError) -> Self {
        Self {
            operation,
            kind: cause.kind(),
        }
    }
}
