//! eopen-insert: Load an application document into eopen_sba and eopen_stt
//!
//! Usage:
//!   # Read data.json, connect with defaults
//!   eopen-insert
//!
//!   # Explicit file and settings
//!   eopen-insert app-42.json --config eopen.toml --db-host db.internal
//!
//!   # Credentials from the environment
//!   EOPEN_DB_PASSWORD=... eopen-insert app-42.json -v

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

use anyhow::{Context, Result};
use clap::Parser;
use eopen::logging::{init_logging, LogConfig, LogFormat};
use eopen::{build_rows, load_document, submit_rows, Config, DbConfig, EopenError, PgSink, SystemClock};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[command(name = "eopen-insert")]
#[command(about = "Insert an account opening application into eopen_sba and eopen_stt", long_about = None)]
struct Args {
    /// Application document
    #[arg(value_name = "FILE", default_value = "data.json")]
    input: PathBuf,

    /// TOML file with a [database] table
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    #[arg(long, env = "EOPEN_DB_HOST")]
    db_host: Option<String>,

    #[arg(long, env = "EOPEN_DB_PORT")]
    db_port: Option<u16>,

    #[arg(long, env = "EOPEN_DB_NAME")]
    db_name: Option<String>,

    #[arg(long, env = "EOPEN_DB_USER")]
    db_user: Option<String>,

    #[arg(long, env = "EOPEN_DB_PASSWORD", hide_env_values = true)]
    db_password: Option<String>,

    /// More output (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    log_format: LogFormat,
}

impl Args {
    /// Flags and environment win over the config file
    fn apply_overrides(&self, db: &mut DbConfig) {
        if let Some(host) = &self.db_host {
            db.host = host.clone();
        }
        if let Some(port) = self.db_port {
            db.port = port;
        }
        if let Some(name) = &self.db_name {
            db.database = name.clone();
        }
        if let Some(user) = &self.db_user {
            db.user = user.clone();
        }
        if let Some(password) = &self.db_password {
            db.password = password.clone();
        }
    }
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
    let mut config = Config::load(args.config.as_deref())?;
    args.apply_overrides(&mut config.database);
    tracing::debug!(database = ?config.database, "effective settings");

    // a missing or broken document fails before any connection is made
    let document = load_document(&args.input)?;
    let rows = build_rows(&document, &SystemClock);

    let mut sink = PgSink::connect(&config.database)
        .with_context(|| format!("connecting to {}:{}", config.database.host, config.database.port))?;
    let report = submit_rows(&rows, &mut sink);

    let app_id = report.app_id;
    let tables = report.finish(sink.close())?;
    tracing::info!(app_id, tables = ?tables, "application loaded");
    Ok(())
}

fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<EopenError>()
        .map(EopenError::exit_code)
        .unwrap_or(1)
}
