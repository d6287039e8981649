use serde::{Deserialize, Serialize};

/// Headline figures for the dashboard cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CardData {
    pub number_of_invoices: usize,
    pub number_of_customers: usize,
    pub total_paid_invoices: String,
    pub total_pending_invoices: String,
}
