//! US dollar display formatting for integer cent amounts.
//!
//! Output matches `en-US` currency formatting: `$1,234.56`, `-$0.05`.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CurrencyParseError {
    #[error("Missing '$' symbol in '{0}'")]
    MissingSymbol(String),

    #[error("Invalid amount '{0}'")]
    InvalidAmount(String),

    #[error("Amount '{0}' has more than two decimal places")]
    TooPrecise(String),
}

/// Format an amount in cents as a dollar string with thousands separators.
///
/// Accepts any integer that widens to `i128`, so aggregated totals format
/// without narrowing.
pub fn format_currency(cents: impl Into<i128>) -> String {
    let cents: i128 = cents.into();
    let sign = if cents < 0 { "-" } else { "" };
    let magnitude = cents.unsigned_abs();
    let dollars = group_thousands(magnitude / 100);
    format!("{}${}.{:02}", sign, dollars, magnitude % 100)
}

/// Parse a string produced by [`format_currency`] back into cents.
pub fn parse_currency(input: &str) -> Result<i64, CurrencyParseError> {
    let trimmed = input.trim();
    let (negative, unsigned) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed),
    };
    let digits = unsigned
        .strip_prefix('$')
        .ok_or_else(|| CurrencyParseError::MissingSymbol(input.to_string()))?
        .replace(',', "");

    let amount: Decimal = digits
        .parse()
        .map_err(|_| CurrencyParseError::InvalidAmount(input.to_string()))?;
    if amount.is_sign_negative() {
        return Err(CurrencyParseError::InvalidAmount(input.to_string()));
    }
    if amount.normalize().scale() > 2 {
        return Err(CurrencyParseError::TooPrecise(input.to_string()));
    }

    let cents = (amount * Decimal::ONE_HUNDRED)
        .to_i64()
        .ok_or_else(|| CurrencyParseError::InvalidAmount(input.to_string()))?;
    Ok(if negative { -cents } else { cents })
}

/// Exact dollar value of a cent amount.
pub fn cents_to_dollars(cents: i64) -> Decimal {
    Decimal::new(cents, 2)
}

fn group_thousands(value: u128) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
