//! eopen-sql: Render an application document as literal INSERT statements
//!
//! For export and debugging; loading into the database goes through
//! eopen-insert.
//!
//! Usage:
//!   # data.json -> sql_inserts.sql
//!   eopen-sql
//!
//!   eopen-sql app-42.json -o app-42.sql

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use eopen::logging::{init_logging, LogConfig, LogFormat};
use eopen::{run, EopenError, SqlScript, SystemClock};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "eopen-sql")]
#[command(about = "Write INSERT statements for an account opening application", long_about = None)]
struct Args {
    /// Application document
    #[arg(value_name = "FILE", default_value = "data.json")]
    input: PathBuf,

    /// Output SQL file, replaced if it exists
    #[arg(long, short = 'o', default_value = "sql_inserts.sql")]
    output: PathBuf,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

fn main() -> ExitCode {
    let args = Args::parse();

    let log_config = LogConfig::from_verbosity(args.verbose).with_format(args.log_format);
    if let Err(e) = init_logging(&log_config) {
        eprintln!("warning: logging disabled: {e}");
    }

    match execute(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err:#}");
            ExitCode::from(exit_code(&err))
        }
    }
}

fn execute(args: &Args) -> Result<()> {
    let clock = SystemClock;
    let mut script = SqlScript::new(&clock);

    run(&args.input, &mut script, &clock)?.into_result()?;
    script
        .write_file(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;

    println!("SQL INSERT statements written to {}", args.output.display());
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<EopenError>()
        .map(EopenError::exit_code)
        .unwrap_or(1)
}
