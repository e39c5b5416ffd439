//! Parameterized inserts into PostgreSQL.
//!
//! sqlx is async; the sink owns a current-thread runtime and blocks on each
//! call so the rest of the pipeline stays synchronous.

use crate::config::DbConfig;
use crate::error::EopenError;
use crate::sink::Sink;
use crate::types::{Cell, ColumnType, Row, SqlValue};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgConnectOptions, PgConnection};
use sqlx::query::Query;
use sqlx::{Connection, Postgres};
use std::collections::HashMap;
use tokio::runtime::Runtime;

pub struct PgSink {
    // declared before `runtime` so it is dropped while the runtime is alive
    conn: Option<PgConnection>,
    runtime: Runtime,
    schema: String,
    /// Statement text per table, authored on first use
    statements: HashMap<&'static str, String>,
}

impl PgSink {
    pub fn connect(config: &DbConfig) -> Result<Self, EopenError> {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()?;

        let options = PgConnectOptions::new()
            .host(&config.host)
            .port(config.port)
            .database(&config.database)
            .username(&config.user)
            .password(&config.password);

        let conn = runtime
            .block_on(PgConnection::connect_with(&options))
            .map_err(EopenError::Connection)?;

        tracing::info!(
            host = %config.host,
            port = config.port,
            database = %config.database,
            "connected to PostgreSQL"
        );

        Ok(PgSink {
            conn: Some(conn),
            runtime,
            schema: config.schema.clone(),
            statements: HashMap::new(),
        })
    }

    /// Close the connection, reporting any error from the server goodbye
    pub fn close(mut self) -> Result<(), EopenError> {
        if let Some(conn) = self.conn.take() {
            self.runtime
                .block_on(conn.close())
                .map_err(EopenError::Connection)?;
            tracing::debug!("database connection closed");
        }
        Ok(())
    }
}

impl Drop for PgSink {
    fn drop(&mut self) {
        if let Some(conn) = self.conn.take() {
            if let Err(e) = self.runtime.block_on(conn.close()) {
                tracing::warn!(error = %e, "error while closing database connection");
            }
        }
    }
}

impl Sink for PgSink {
    fn submit(&mut self, row: &Row) -> Result<(), EopenError> {
        let schema = &self.schema;
        let sql = self
            .statements
            .entry(row.table)
            .or_insert_with(|| insert_statement(schema, row));

        let conn = self
            .conn
            .as_mut()
            .ok_or(EopenError::Connection(sqlx::Error::PoolClosed))?;

        let inserted = self
            .runtime
            .block_on(insert_in_transaction(conn, sql, row))
            .map_err(|source| EopenError::RowSubmit {
                table: row.table,
                source,
            })?;

        tracing::debug!(table = row.table, rows = inserted, "row committed");
        Ok(())
    }
}

/// Execute one insert; commit on success, roll back on failure.
async fn insert_in_transaction(
    conn: &mut PgConnection,
    sql: &str,
    row: &Row,
) -> Result<u64, sqlx::Error> {
    let mut tx = conn.begin().await?;

    let mut query = sqlx::query(sql);
    for cell in row.cells.iter().filter(|c| !is_expression(c)) {
        query = bind_cell(query, cell);
    }

    match query.execute(&mut *tx).await {
        Ok(done) => {
            tx.commit().await?;
            Ok(done.rows_affected())
        }
        Err(e) => {
            if let Err(rollback) = tx.rollback().await {
                tracing::warn!(table = row.table, error = %rollback, "rollback failed");
            } else {
                tracing::warn!(table = row.table, "insert rolled back");
            }
            Err(e)
        }
    }
}

/// `INSERT INTO <schema>.<table> (...) VALUES ($1, ...)`. Server-side
/// expressions are written inline, every other column gets a placeholder.
/// Date columns receive text cast on the server, so dates kept verbatim are
/// parsed by PostgreSQL rather than rejected as text.
pub fn insert_statement(schema: &str, row: &Row) -> String {
    let columns: Vec<&str> = row.columns().collect();
    let mut next = 0;
    let values: Vec<String> = row
        .cells
        .iter()
        .map(|cell| match (&cell.value, cell.kind) {
            (SqlValue::Expression(expr), _) => expr.to_string(),
            (_, ColumnType::Date) => {
                next += 1;
                format!("CAST(${next} AS date)")
            }
            _ => {
                next += 1;
                format!("${next}")
            }
        })
        .collect();

    let table = if schema.is_empty() {
        row.table.to_string()
    } else {
        format!("{schema}.{}", row.table)
    };

    format!(
        "INSERT INTO {table} ({}) VALUES ({})",
        columns.join(", "),
        values.join(", ")
    )
}

fn is_expression(cell: &Cell) -> bool {
    matches!(cell.value, SqlValue::Expression(_))
}

fn bind_cell<'q>(
    query: Query<'q, Postgres, PgArguments>,
    cell: &Cell,
) -> Query<'q, Postgres, PgArguments> {
    if cell.kind == ColumnType::Date && !is_expression(cell) {
        return query.bind(date_param(cell.value.truncated(cell.max_len)));
    }

    match cell.value.truncated(cell.max_len) {
        // NULLs carry the column type so the server accepts them
        SqlValue::Null => match cell.kind {
            ColumnType::Integer => query.bind(None::<i64>),
            ColumnType::Numeric => query.bind(None::<Decimal>),
            ColumnType::Text | ColumnType::Date => query.bind(None::<String>),
            ColumnType::Boolean => query.bind(None::<bool>),
        },
        SqlValue::Bool(b) => query.bind(b),
        SqlValue::Int(n) => query.bind(n),
        SqlValue::Decimal(d) => query.bind(d),
        SqlValue::Text(s) => query.bind(s),
        SqlValue::Date(d) => query.bind(d),
        SqlValue::Expression(_) => query,
    }
}

/// Text sent for a date column; `None` binds a text NULL
fn date_param(value: SqlValue) -> Option<String> {
    match value {
        SqlValue::Null => None,
        SqlValue::Date(d) => Some(d.format("%Y-%m-%d").to_string()),
        SqlValue::Text(s) => Some(s),
        SqlValue::Bool(b) => Some(b.to_string()),
        SqlValue::Int(n) => Some(n.to_string()),
        SqlValue::Decimal(d) => Some(d.to_string()),
        SqlValue::Expression(expr) => Some(expr.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::rows::{build_rows, sba, stt};
    use chrono::NaiveDate;
    use serde_json::json;

    fn rows() -> Vec<Row> {
        let clock = FixedClock(
            NaiveDate::from_ymd_opt(2024, 6, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
        );
        build_rows(&json!({"applicationId": 42}), &clock)
    }

    #[test]
    fn test_statement_shape() {
        let mut row = Row::new("eopen_sba");
        for (column, value) in [
            ("trans_date", SqlValue::Null),
            ("request_time", SqlValue::Expression("EXTRACT(epoch FROM now())")),
            ("app_id", SqlValue::Int(1)),
            ("entry_datetime", SqlValue::Expression("now()")),
        ] {
            row.push(Cell {
                column,
                kind: ColumnType::Text,
                max_len: None,
                value,
            });
        }

        assert_eq!(
            insert_statement("public", &row),
            "INSERT INTO public.eopen_sba (trans_date, request_time, app_id, entry_datetime) \
             VALUES ($1, EXTRACT(epoch FROM now()), $2, now())"
        );
        assert!(insert_statement("", &row).starts_with("INSERT INTO eopen_sba ("));
    }

    #[test]
    fn test_placeholders_match_bound_columns() {
        for row in rows() {
            let sql = insert_statement("public", &row);
            let bound = row.cells.iter().filter(|c| !is_expression(c)).count();

            assert_eq!(sql.matches('$').count(), bound, "{}", row.table);
            assert!(sql.contains(&format!("${bound}")), "{}", row.table);
            assert_eq!(sql.matches(", ").count() + 2, 2 * row.len(), "{}", row.table);
        }
    }

    #[test]
    fn test_date_columns_cast_from_text() {
        let mut row = Row::new("eopen_sba");
        for (column, kind, value) in [
            ("app_id", ColumnType::Integer, SqlValue::Int(1)),
            ("cardissue", ColumnType::Date, SqlValue::text("2024-01-15T10:30:00")),
            ("birthday", ColumnType::Date, SqlValue::Null),
        ] {
            row.push(Cell {
                column,
                kind,
                max_len: None,
                value,
            });
        }

        assert_eq!(
            insert_statement("public", &row),
            "INSERT INTO public.eopen_sba (app_id, cardissue, birthday) \
             VALUES ($1, CAST($2 AS date), CAST($3 AS date))"
        );
    }

    #[test]
    fn test_date_params_are_text() {
        let day = NaiveDate::from_ymd_opt(1990, 1, 15).unwrap();
        assert_eq!(date_param(SqlValue::Date(day)).as_deref(), Some("1990-01-15"));
        assert_eq!(date_param(SqlValue::text("LIFELONG")).as_deref(), Some("LIFELONG"));
        assert_eq!(date_param(SqlValue::Null), None);
    }

    #[test]
    fn test_plan_date_columns_are_cast() {
        for row in rows() {
            let sql = insert_statement("public", &row);
            let dates = row.cells.iter().filter(|c| c.kind == ColumnType::Date).count();
            assert!(dates > 0, "{}", row.table);
            assert_eq!(sql.matches(" AS date)").count(), dates, "{}", row.table);
        }
    }

    #[test]
    fn test_sba_statement_names_table() {
        let rows = rows();
        let expected = [sba::TABLE, stt::TABLE];
        for (row, table) in rows.iter().zip(expected) {
            let sql = insert_statement("public", row);
            assert!(sql.starts_with(&format!("INSERT INTO public.{table} (")));
        }
    }
}
