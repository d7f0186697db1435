//! cnr-restore - Candidate nomination restore
//!
//! Re-inserts candidates that are present in a nomination export but
//! missing from the election store. Candidates already in the store are
//! never duplicated, so the tool can be re-run safely.
//!
//! Exit status is non-zero only when the run cannot start or the export
//! cannot be read; per-line failures are reported in the summary.

use anyhow::{Context, Result};
use clap::Parser;
use cnr_common::config::{self, ConfigOrigin};
use cnr_restore::district::DistrictTable;
use cnr_restore::{Reconciler, RestoreOptions, SqliteStore};
use std::path::PathBuf;
use tokio::io::BufReader;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for cnr-restore
#[derive(Parser, Debug)]
#[command(name = "cnr-restore")]
#[command(about = "Restore missing candidate nominations from a CSV export")]
#[command(version)]
struct Args {
    /// Nomination export (comma-separated, header line first)
    source: PathBuf,

    /// SQLite store path (overrides CNR_DATABASE and the config file)
    #[arg(short, long)]
    database: Option<PathBuf>,

    /// TOML bootstrap config
    #[arg(short, long, env = "CNR_CONFIG")]
    config: Option<PathBuf>,

    /// Resolve and diff only, never insert
    #[arg(long)]
    dry_run: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let (toml_config, origin) =
        config::load_or_default(args.config.as_deref()).context("Failed to load configuration")?;

    // RUST_LOG wins over the config file level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&toml_config.logging.level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting cnr-restore v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );

    match &origin {
        ConfigOrigin::File(path) => info!("Config: {}", path.display()),
        ConfigOrigin::Missing(path) => {
            warn!("Config file {} not found, using built-in defaults", path.display())
        }
        ConfigOrigin::Defaults => info!("Config: built-in defaults"),
    }

    let districts = DistrictTable::from_config(toml_config.districts.as_ref())
        .context("Invalid district table")?;
    info!("District table: {} entries", districts.len());

    let db_path = config::resolve_database_path(
        args.database.as_deref(),
        config::DATABASE_ENV_VAR,
        &toml_config,
    );
    info!("Database: {}", db_path.display());

    let pool = cnr_common::db::connect_existing(&db_path)
        .await
        .with_context(|| format!("Failed to open store {}", db_path.display()))?;

    let file = tokio::fs::File::open(&args.source)
        .await
        .with_context(|| format!("Failed to open export {}", args.source.display()))?;
    info!("Source: {}", args.source.display());

    let mut reconciler = Reconciler::new(SqliteStore::new(pool.clone()), districts)
        .with_options(RestoreOptions {
            dry_run: args.dry_run,
        });

    let summary = reconciler
        .run(BufReader::new(file))
        .await
        .context("Restore run aborted")?;

    pool.close().await;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("{}", summary.display_string());
        for failure in &summary.failures {
            println!(
                "  line {}: {} ({})",
                failure.line_number, failure.reason, failure.candidate
            );
        }
    }

    Ok(())
}
