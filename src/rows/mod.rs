//! Flattening of an application document into destination rows
//!
//! Each destination table is described by a [`TablePlan`]: its ordered columns
//! and the rule producing each value. One [`RowBuilder`] serves both tables.

pub mod application;
pub mod builder;
pub mod plan;
pub mod sba;
pub mod stt;

pub use application::Application;
pub use builder::RowBuilder;
pub use plan::{ColumnPlan, Derivation, FieldRule, TablePlan};

use crate::clock::Clock;
use crate::types::Row;
use serde_json::Value;

/// Plans for every destination table, in submission order
pub fn plans() -> [&'static TablePlan; 2] {
    [&*sba::PLAN, &*stt::PLAN]
}

/// Build one row per destination table
pub fn build_rows(document: &Value, clock: &dyn Clock) -> Vec<Row> {
    let app = Application::new(document, clock);
    plans()
        .into_iter()
        .map(|plan| RowBuilder::new(plan).build(&app))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use chrono::NaiveDate;
    use serde_json::json;

    #[test]
    fn test_build_rows_in_order() {
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );
        let rows = build_rows(&json!({"applicationId": 5}), &clock);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].table, sba::TABLE);
        assert_eq!(rows[1].table, stt::TABLE);
        assert_eq!(rows[0].len(), sba::PLAN.len());
        assert_eq!(rows[1].len(), stt::PLAN.len());
    }
}
