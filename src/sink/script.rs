use crate::clock::Clock;
use crate::error::EopenError;
use crate::sanitize::sql_literal;
use crate::sink::Sink;
use crate::types::Row;
use chrono::NaiveDateTime;
use std::io::Write;
use std::path::Path;

/// Collects literal `INSERT` statements and writes them out as one script
pub struct SqlScript {
    generated_at: NaiveDateTime,
    statements: Vec<String>,
}

impl SqlScript {
    pub fn new(clock: &dyn Clock) -> Self {
        SqlScript {
            generated_at: clock.now(),
            statements: Vec::new(),
        }
    }

    /// Banner comment placed on the first line
    pub fn header(&self) -> String {
        format!(
            "-- SQL INSERT statements generated at {}",
            self.generated_at.format("%Y-%m-%d %H:%M:%S")
        )
    }

    pub fn statements(&self) -> &[String] {
        &self.statements
    }

    /// Header followed by every statement, blank-line separated
    pub fn render(&self) -> String {
        let mut out = self.header();
        out.push_str("\n\n");
        for statement in &self.statements {
            out.push_str(statement);
            out.push_str("\n\n");
        }
        out
    }

    pub fn write_to<W: Write>(&self, mut writer: W) -> Result<(), EopenError> {
        writer.write_all(self.render().as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    /// Write the script to `path`, replacing any existing file
    pub fn write_file(&self, path: &Path) -> Result<(), EopenError> {
        let file = std::fs::File::create(path)?;
        self.write_to(std::io::BufWriter::new(file))?;
        tracing::info!(
            path = %path.display(),
            statements = self.statements.len(),
            "wrote SQL script"
        );
        Ok(())
    }
}

/// `INSERT INTO <table> (<columns>) VALUES (<literals>);`
pub fn render_insert(row: &Row) -> String {
    let columns: Vec<&str> = row.columns().collect();
    let values: Vec<String> = row
        .cells
        .iter()
        .map(|cell| sql_literal(&cell.value, cell.max_len))
        .collect();

    format!(
        "INSERT INTO {} ({})\nVALUES ({});",
        row.table,
        columns.join(", "),
        values.join(", ")
    )
}

impl Sink for SqlScript {
    fn submit(&mut self, row: &Row) -> Result<(), EopenError> {
        self.statements.push(render_insert(row));
        Ok(())
    }
}
