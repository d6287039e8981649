use chrono::NaiveDate;

/// Display form of a calendar date, e.g. `Dec 6, 2022`.
pub fn format_date_to_local(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}
