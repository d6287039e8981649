//! Customer model for dashboard-data.

use crate::utils::format_currency;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Customer as served by the JSON data source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Customer id and name, for selection lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct CustomerField {
    pub id: Uuid,
    pub name: String,
}

/// Per-customer invoice totals as aggregated by the database, in cents.
#[derive(Debug, Clone, FromRow)]
pub struct CustomerSummaryRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: i64,
    pub total_paid: i64,
}

/// Customers table row with display-formatted totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummaryRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub total_invoices: i64,
    pub total_pending: String,
    pub total_paid: String,
}

impl From<CustomerSummaryRecord> for CustomerSummaryRow {
    fn from(record: CustomerSummaryRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            image_url: record.image_url,
            total_invoices: record.total_invoices,
            total_pending: format_currency(record.total_pending),
            total_paid: format_currency(record.total_paid),
        }
    }
}
