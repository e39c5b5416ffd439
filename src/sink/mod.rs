//! Destinations for built rows
//!
//! - [`PgSink`] executes a parameterized `INSERT` per row inside its own
//!   transaction. This is the normal path.
//! - [`SqlScript`] renders literal `INSERT` statements into a file for export
//!   and debugging. Values are embedded through [`crate::sanitize`].

pub mod postgres;
pub mod script;

pub use postgres::PgSink;
pub use script::SqlScript;

use crate::error::EopenError;
use crate::types::Row;

/// Something that accepts rows for their destination table
pub trait Sink {
    fn submit(&mut self, row: &Row) -> Result<(), EopenError>;
}
