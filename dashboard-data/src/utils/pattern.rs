//! `ILIKE` pattern construction for user-supplied search terms.
//!
//! Queries using these patterns must declare `ESCAPE '\'`.

const ESCAPE: char = '\\';

/// Escape `LIKE` metacharacters so `term` matches literally.
pub fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for ch in term.chars() {
        if matches!(ch, '%' | '_' | ESCAPE) {
            escaped.push(ESCAPE);
        }
        escaped.push(ch);
    }
    escaped
}

/// Substring pattern: the escaped term surrounded by `%` wildcards.
pub fn contains_pattern(term: &str) -> String {
    format!("%{}%", escape_like(term))
}
