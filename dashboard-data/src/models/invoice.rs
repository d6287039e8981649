//! Invoice model for dashboard-data.

use crate::utils::cents_to_dollars;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Invoice payment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    Pending,
    Paid,
}

impl InvoiceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InvoiceStatus::Pending => "pending",
            InvoiceStatus::Paid => "paid",
        }
    }
}

/// Invoice as served by the JSON data source. Amount is in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    pub customer_id: String,
    pub amount: i64,
    pub date: NaiveDate,
    pub status: InvoiceStatus,
}

/// Invoice joined with its customer for the "latest invoices" card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LatestInvoice {
    pub id: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
    pub amount: String,
    pub date: NaiveDate,
}

/// Row of the searchable invoices table. Amount is in cents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct InvoicesTableRow {
    pub id: Uuid,
    pub amount: i64,
    pub date: NaiveDate,
    pub status: String,
    pub name: String,
    pub email: String,
    pub image_url: String,
}

/// Stored invoice fields as read for the edit form.
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceFormRecord {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: i64,
    pub status: String,
}

/// Invoice edit form with the amount in dollars.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvoiceForm {
    pub id: Uuid,
    pub customer_id: Uuid,
    pub amount: Decimal,
    pub status: String,
}

impl From<InvoiceFormRecord> for InvoiceForm {
    fn from(record: InvoiceFormRecord) -> Self {
        Self {
            id: record.id,
            customer_id: record.customer_id,
            amount: cents_to_dollars(record.amount),
            status: record.status,
        }
    }
}
