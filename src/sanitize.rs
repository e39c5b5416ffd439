//! SQL literal rendering for the script export path.
//!
//! Only value positions ever go through here; table and column names come
//! from the static plans.

use crate::types::{truncate_chars, SqlValue};

/// Render `value` as a standalone SQL literal.
///
/// Text is cut to `max_len` characters first, then quotes are doubled, so the
/// limit applies to the stored value rather than its escaped form.
pub fn sql_literal(value: &SqlValue, max_len: Option<usize>) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Bool(true) => "TRUE".to_string(),
        SqlValue::Bool(false) => "FALSE".to_string(),
        SqlValue::Int(n) => n.to_string(),
        SqlValue::Decimal(d) => d.normalize().to_string(),
        SqlValue::Text(s) => quote(s, max_len),
        SqlValue::Date(date) => format!("'{}'", date.format("%Y-%m-%d")),
        SqlValue::Expression(expr) => (*expr).to_string(),
    }
}

fn quote(raw: &str, max_len: Option<usize>) -> String {
    let cut = match max_len {
        Some(limit) => truncate_chars(raw, limit),
        None => raw.to_string(),
    };
    format!("'{}'", cut.replace('\'', "''"))
}
