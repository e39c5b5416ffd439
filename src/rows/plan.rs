//! Column plans for the destination tables
//!
//! A plan is the ordered list of columns of one table together with the rule
//! that produces each value. The two eopen tables are described as data
//! (`sba::PLAN`, `stt::PLAN`) and share one builder.

use crate::rows::application::Application;
use crate::types::{ColumnType, SqlValue};
use std::fmt;

/// Produces a column value from the application document
pub type Derivation = fn(&Application) -> SqlValue;

/// How a column gets its value
#[derive(Clone)]
pub enum FieldRule {
    /// Extracted from the document
    Derived(Derivation),
    /// Same value for every application
    Constant(SqlValue),
    /// Current date from the run's clock
    Today,
    /// Evaluated by the database, e.g. `now()`
    Expression(&'static str),
}

impl fmt::Debug for FieldRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldRule::Derived(_) => f.write_str("Derived"),
            FieldRule::Constant(value) => f.debug_tuple("Constant").field(value).finish(),
            FieldRule::Today => f.write_str("Today"),
            FieldRule::Expression(expr) => f.debug_tuple("Expression").field(expr).finish(),
        }
    }
}

/// Pre-computed description of one destination column
#[derive(Debug, Clone)]
pub struct ColumnPlan {
    pub name: &'static str,
    pub kind: ColumnType,
    /// Character budget of the destination column, for text values
    pub max_len: Option<usize>,
    pub rule: FieldRule,
}

impl ColumnPlan {
    pub fn text(name: &'static str, max_len: usize, derive: Derivation) -> Self {
        ColumnPlan {
            name,
            kind: ColumnType::Text,
            max_len: Some(max_len),
            rule: FieldRule::Derived(derive),
        }
    }

    pub fn integer(name: &'static str, derive: Derivation) -> Self {
        Self::derived(name, ColumnType::Integer, derive)
    }

    pub fn numeric(name: &'static str, derive: Derivation) -> Self {
        Self::derived(name, ColumnType::Numeric, derive)
    }

    pub fn date(name: &'static str, derive: Derivation) -> Self {
        Self::derived(name, ColumnType::Date, derive)
    }

    fn derived(name: &'static str, kind: ColumnType, derive: Derivation) -> Self {
        ColumnPlan {
            name,
            kind,
            max_len: None,
            rule: FieldRule::Derived(derive),
        }
    }

    /// Constant column; the type follows the value
    pub fn constant(name: &'static str, value: SqlValue) -> Self {
        let kind = match &value {
            SqlValue::Int(_) => ColumnType::Integer,
            SqlValue::Decimal(_) => ColumnType::Numeric,
            SqlValue::Bool(_) => ColumnType::Boolean,
            SqlValue::Date(_) => ColumnType::Date,
            _ => ColumnType::Text,
        };
        ColumnPlan {
            name,
            kind,
            max_len: None,
            rule: FieldRule::Constant(value),
        }
    }

    pub fn today(name: &'static str) -> Self {
        ColumnPlan {
            name,
            kind: ColumnType::Date,
            max_len: None,
            rule: FieldRule::Today,
        }
    }

    pub fn expression(name: &'static str, kind: ColumnType, expr: &'static str) -> Self {
        ColumnPlan {
            name,
            kind,
            max_len: None,
            rule: FieldRule::Expression(expr),
        }
    }

    /// Resolve this column for one application
    pub fn resolve(&self, app: &Application) -> SqlValue {
        match &self.rule {
            FieldRule::Derived(derive) => derive(app),
            FieldRule::Constant(value) => value.clone(),
            FieldRule::Today => SqlValue::Date(app.today()),
            FieldRule::Expression(expr) => SqlValue::Expression(*expr),
        }
    }
}

/// Complete plan for one destination table
#[derive(Debug, Clone)]
pub struct TablePlan {
    pub table: &'static str,
    pub columns: Vec<ColumnPlan>,
}

impl TablePlan {
    pub fn new(table: &'static str, columns: Vec<ColumnPlan>) -> Self {
        TablePlan { table, columns }
    }

    pub fn column_names(&self) -> Vec<&'static str> {
        self.columns.iter().map(|c| c.name).collect()
    }

    pub fn get(&self, name: &str) -> Option<&ColumnPlan> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }
}
