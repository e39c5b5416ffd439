//! Plan-driven row construction
//!
//! `RowBuilder` walks a [`TablePlan`] in order and resolves every column, so a
//! built row always has exactly the plan's columns.

use crate::rows::application::Application;
use crate::rows::plan::TablePlan;
use crate::types::{Cell, Row};

/// Builds rows for one destination table
pub struct RowBuilder<'p> {
    plan: &'p TablePlan,
}

impl<'p> RowBuilder<'p> {
    pub fn new(plan: &'p TablePlan) -> Self {
        RowBuilder { plan }
    }

    pub fn build(&self, app: &Application) -> Row {
        let mut row = Row::new(self.plan.table);
        for column in &self.plan.columns {
            row.push(Cell {
                column: column.name,
                kind: column.kind,
                max_len: column.max_len,
                value: column.resolve(app),
            });
        }
        row
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::rows::plan::ColumnPlan;
    use crate::types::{ColumnType, SqlValue};
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_build_follows_plan_order() {
        let plan = TablePlan::new(
            "demo",
            vec![
                ColumnPlan::today("trans_date"),
                ColumnPlan::integer("app_id", |app| app.integer("applicationId")),
                ColumnPlan::constant("entry_user", SqlValue::text("SYSTEM")),
                ColumnPlan::text("tname", 100, |app| app.text("data.thFirstName")),
                ColumnPlan::expression("entry_datetime", ColumnType::Text, "now()"),
            ],
        );
        let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        let clock = FixedClock(today.and_hms_opt(8, 30, 0).unwrap());
        let doc = json!({"applicationId": 7, "data": {"thFirstName": "Somchai"}});

        let row = RowBuilder::new(&plan).build(&Application::new(&doc, &clock));

        assert_eq!(row.table, "demo");
        assert_eq!(row.columns().collect::<Vec<_>>(), plan.column_names());
        assert_eq!(row.get("trans_date"), Some(&SqlValue::Date(today)));
        assert_eq!(row.get("app_id"), Some(&SqlValue::Int(7)));
        assert_eq!(row.text("entry_user"), Some("SYSTEM"));
        assert_eq!(row.text("tname"), Some("Somchai"));
        assert_eq!(row.get("entry_datetime"), Some(&SqlValue::Expression("now()")));
        assert_eq!(row.cells[3].max_len, Some(100));
    }
}
