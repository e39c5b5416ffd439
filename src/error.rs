//! Error types for eopen.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can stop a run.
#[derive(Debug, Error)]
pub enum EopenError {
    /// The input document does not exist.
    #[error("input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// The input document is not a JSON object.
    #[error("input is not a valid application document: {message}")]
    InputMalformed { message: String },

    /// Could not reach the database.
    #[error("database connection failed: {0}")]
    Connection(#[source] sqlx::Error),

    /// A row was rejected; its transaction has been rolled back.
    #[error("insert into {table} failed: {source}")]
    RowSubmit {
        table: &'static str,
        #[source]
        source: sqlx::Error,
    },

    /// Configuration file could not be read or parsed.
    #[error("configuration error: {0}")]
    Config(String),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl EopenError {
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::InputMalformed {
            message: message.into(),
        }
    }

    /// Process exit code for this failure kind (sysexits.h values).
    pub fn exit_code(&self) -> u8 {
        match self {
            EopenError::InputMalformed { .. } => 65,
            EopenError::InputNotFound { .. } => 66,
            EopenError::Connection(_) => 69,
            EopenError::RowSubmit { .. } => 70,
            EopenError::Io(_) => 74,
            EopenError::Config(_) => 78,
        }
    }
}
