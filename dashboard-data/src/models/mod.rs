//! Domain models for dashboard-data.

mod card;
mod customer;
mod invoice;
mod revenue;

pub use card::CardData;
pub use customer::{Customer, CustomerField, CustomerSummaryRecord, CustomerSummaryRow};
pub use invoice::{
    Invoice, InvoiceForm, InvoiceFormRecord, InvoiceStatus, InvoicesTableRow, LatestInvoice,
};
pub use revenue::Revenue;
