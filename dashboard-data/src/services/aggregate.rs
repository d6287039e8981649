//! In-memory join and summary over fetched invoice and customer collections.

use crate::error::DataError;
use crate::models::{CardData, Customer, Invoice, InvoiceStatus, LatestInvoice};
use crate::utils::format_currency;
use std::collections::HashMap;

/// Join every invoice with its customer, newest first, keeping `limit`.
///
/// Every invoice must resolve, including those that fall outside `limit`.
/// Invoices sharing a date keep their source order. When customer ids
/// repeat, the first customer wins.
pub fn latest_invoices(
    invoices: &[Invoice],
    customers: &[Customer],
    limit: usize,
) -> Result<Vec<LatestInvoice>, DataError> {
    let mut by_id: HashMap<&str, &Customer> = HashMap::with_capacity(customers.len());
    for customer in customers {
        by_id.entry(customer.id.as_str()).or_insert(customer);
    }

    let mut joined = invoices
        .iter()
        .map(|invoice| {
            let customer = by_id.get(invoice.customer_id.as_str()).ok_or_else(|| {
                DataError::MissingRelatedEntity {
                    invoice_id: invoice.id.clone(),
                }
            })?;
            Ok((invoice, *customer))
        })
        .collect::<Result<Vec<_>, DataError>>()?;

    // Stable: equal dates stay in source order.
    joined.sort_by(|(a, _), (b, _)| b.date.cmp(&a.date));

    Ok(joined
        .into_iter()
        .take(limit)
        .map(|(invoice, customer)| LatestInvoice {
            id: invoice.id.clone(),
            name: customer.name.clone(),
            email: customer.email.clone(),
            image_url: customer.image_url.clone(),
            amount: format_currency(invoice.amount),
            date: invoice.date,
        })
        .collect())
}

/// Counts and per-status totals for the dashboard cards.
///
/// Totals accumulate in `i128`: a slice would need more than `2^64` invoices
/// before the sum of `i64` cent amounts could overflow.
pub fn card_summary(invoices: &[Invoice], customers: &[Customer]) -> CardData {
    let total_for = |status: InvoiceStatus| -> i128 {
        invoices
            .iter()
            .filter(|invoice| invoice.status == status)
            .map(|invoice| i128::from(invoice.amount))
            .sum()
    };

    CardData {
        number_of_invoices: invoices.len(),
        number_of_customers: customers.len(),
        total_paid_invoices: format_currency(total_for(InvoiceStatus::Paid)),
        total_pending_invoices: format_currency(total_for(InvoiceStatus::Pending)),
    }
}
