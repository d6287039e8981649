//! Formatting and query helpers.

pub mod currency;
pub mod dates;
pub mod pattern;

pub use currency::{cents_to_dollars, format_currency, parse_currency, CurrencyParseError};
pub use dates::format_date_to_local;
pub use pattern::contains_pattern;
