//! # eopen - account opening application loader
//!
//! Flattens a nested JSON application-form document into one row for
//! `eopen_sba` (account record) and one row for `eopen_stt` (status/tracking
//! record), then hands both rows to a [`Sink`].
//!
//! ## Modules
//!
//! - **extractor**: total, path-based reads from the document
//! - **dates**: normalization of the date formats found in documents
//! - **rows**: table plans and the row builder
//! - **sanitize**: SQL literal rendering for the script export
//! - **sink**: parameterized PostgreSQL inserts or a literal SQL script
//!
//! ## Quick Start
//!
//! ```rust
//! use eopen::clock::SystemClock;
//! use eopen::rows::build_rows;
//! use eopen::sink::SqlScript;
//! use serde_json::json;
//!
//! # fn main() -> Result<(), eopen::EopenError> {
//! let document = json!({
//!     "applicationId": 42,
//!     "types": ["EQUITY"],
//!     "data": {"thFirstName": "Somchai", "cardNumber": "1234567890123"}
//! });
//!
//! let mut script = SqlScript::new(&SystemClock);
//! let report = eopen::submit_rows(&build_rows(&document, &SystemClock), &mut script);
//! assert!(report.is_success());
//!
//! // one INSERT per table
//! assert_eq!(script.statements().len(), 2);
//! # Ok(())
//! # }
//! ```

use std::path::Path;

pub mod clock;
pub mod config;
pub mod dates;
pub mod error;
pub mod extractor;
pub mod loader;
pub mod logging;
pub mod rows;
pub mod sanitize;
pub mod sink;
pub mod types;

// Re-export commonly used types for convenience
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{Config, DbConfig};
pub use error::EopenError;
pub use loader::{load_document, parse_document};
pub use rows::build_rows;
pub use sink::{PgSink, Sink, SqlScript};
pub use types::{Row, SqlValue};

/// Outcome of submitting one document's rows
#[derive(Debug, Default)]
pub struct RunReport {
    pub app_id: i64,
    /// Tables whose row was accepted, in submission order
    pub submitted: Vec<&'static str>,
    pub failures: Vec<EopenError>,
}

impl RunReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// First failure, if any row was rejected
    pub fn into_result(self) -> Result<Vec<&'static str>, EopenError> {
        match self.failures.into_iter().next() {
            Some(err) => Err(err),
            None => Ok(self.submitted),
        }
    }

    /// Like [`into_result`](Self::into_result), folding in the outcome of
    /// closing the sink. A rejected row outranks a close error.
    pub fn finish(self, closed: Result<(), EopenError>) -> Result<Vec<&'static str>, EopenError> {
        match (self.into_result(), closed) {
            (Err(rejected), Err(close)) => {
                tracing::warn!(error = %close, "closing the sink failed");
                Err(rejected)
            }
            (Err(rejected), Ok(())) => Err(rejected),
            (Ok(_), Err(close)) => Err(close),
            (Ok(tables), Ok(())) => Ok(tables),
        }
    }
}

/// Hand every row to `sink`. A rejected row does not stop the rest.
pub fn submit_rows(rows: &[Row], sink: &mut dyn Sink) -> RunReport {
    let app_id = rows
        .first()
        .and_then(|row| match row.get("app_id") {
            Some(SqlValue::Int(id)) => Some(*id),
            _ => None,
        })
        .unwrap_or_default();

    let mut report = RunReport {
        app_id,
        ..RunReport::default()
    };

    for row in rows {
        match sink.submit(row) {
            Ok(()) => {
                tracing::info!(table = row.table, app_id, columns = row.len(), "row submitted");
                report.submitted.push(row.table);
            }
            Err(e) => {
                tracing::error!(table = row.table, app_id, error = %e, "row rejected");
                report.failures.push(e);
            }
        }
    }

    report
}

/// Main entry point: load the document at `input`, build its rows, submit them
pub fn run(input: &Path, sink: &mut dyn Sink, clock: &dyn Clock) -> Result<RunReport, EopenError> {
    let document = load_document(input)?;
    let rows = build_rows(&document, clock);
    Ok(submit_rows(&rows, sink))
}
