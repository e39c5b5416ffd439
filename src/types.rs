use chrono::NaiveDate;
use rust_decimal::Decimal;

/// A single value bound to one destination column
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Null,
    Bool(bool),
    Int(i64),
    Decimal(Decimal),
    Text(String),
    Date(NaiveDate),
    /// Trusted server-side expression, e.g. `now()`. Never built from document data.
    Expression(&'static str),
}

impl SqlValue {
    pub fn text(value: impl Into<String>) -> Self {
        SqlValue::Text(value.into())
    }

    /// `'Y'` / `'N'` flag as stored by the eopen tables
    pub fn yes_no(flag: bool) -> Self {
        SqlValue::Text(if flag { "Y" } else { "N" }.to_string())
    }

    /// Text content, if this is a text value
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SqlValue::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Cut text values to at most `max_len` characters; other values pass through.
    pub fn truncated(&self, max_len: Option<usize>) -> SqlValue {
        match (self, max_len) {
            (SqlValue::Text(s), Some(limit)) => SqlValue::Text(truncate_chars(s, limit)),
            _ => self.clone(),
        }
    }
}

/// Character-based truncation; never splits a UTF-8 sequence.
pub fn truncate_chars(s: &str, limit: usize) -> String {
    match s.char_indices().nth(limit) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

/// Destination column type. Used to type NULL parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Text,
    Integer,
    Numeric,
    Date,
    Boolean,
}

/// One column of a built row
#[derive(Debug, Clone, PartialEq)]
pub struct Cell {
    pub column: &'static str,
    pub kind: ColumnType,
    pub max_len: Option<usize>,
    pub value: SqlValue,
}

/// An ordered row for one destination table
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    /// Destination table, e.g. "eopen_sba"
    pub table: &'static str,

    /// Cells in schema order; one per column, never omitted
    pub cells: Vec<Cell>,
}

impl Row {
    pub fn new(table: &'static str) -> Self {
        Row {
            table,
            cells: Vec::new(),
        }
    }

    pub fn push(&mut self, cell: Cell) {
        self.cells.push(cell);
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.cells.iter().map(|c| c.column)
    }

    /// Value bound to `column`, if the table has it
    pub fn get(&self, column: &str) -> Option<&SqlValue> {
        self.cells
            .iter()
            .find(|c| c.column == column)
            .map(|c| &c.value)
    }

    /// Shortcut for text columns; `None` when the column is missing or not text
    pub fn text(&self, column: &str) -> Option<&str> {
        self.get(column).and_then(SqlValue::as_text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_counts_characters() {
        assert_eq!(truncate_chars("สมชาย", 3), "สมช");
        assert_eq!(truncate_chars("abc", 10), "abc");
        assert_eq!(truncate_chars("abc", 0), "");
    }

    #[test]
    fn test_truncated_leaves_non_text_alone() {
        assert_eq!(SqlValue::Int(123456).truncated(Some(2)), SqlValue::Int(123456));
        assert_eq!(
            SqlValue::text("Sukhumvit").truncated(Some(4)),
            SqlValue::text("Sukh")
        );
        assert_eq!(SqlValue::text("Sukhumvit").truncated(None), SqlValue::text("Sukhumvit"));
    }

    #[test]
    fn test_row_lookup() {
        let mut row = Row::new("eopen_sba");
        row.push(Cell {
            column: "app_id",
            kind: ColumnType::Integer,
            max_len: None,
            value: SqlValue::Int(42),
        });
        row.push(Cell {
            column: "tname",
            kind: ColumnType::Text,
            max_len: Some(100),
            value: SqlValue::text("Somchai"),
        });

        assert_eq!(row.len(), 2);
        assert_eq!(row.get("app_id"), Some(&SqlValue::Int(42)));
        assert_eq!(row.text("tname"), Some("Somchai"));
        assert_eq!(row.text("app_id"), None);
        assert_eq!(row.get("missing"), None);
        assert_eq!(row.columns().collect::<Vec<_>>(), vec!["app_id", "tname"]);
    }
}
