//! sehat - village community health records CLI
//!
//! Operational surface around the records database: schema initialization,
//! quick stats, CSV export, backup/restore, and the NCD due list.
//!
//! Uses XDG Base Directory specification for file locations:
//! - Database: $XDG_DATA_HOME/sehat/records.db (~/.local/share/sehat/records.db)
//! - Logs: $XDG_STATE_HOME/sehat/sehat.log (~/.local/state/sehat/sehat.log)
//! - Config: $XDG_CONFIG_HOME/sehat/config.toml (~/.config/sehat/config.toml)

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use sehat_core::{Config, RecordsStore};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "sehat")]
#[command(about = "Village community health records")]
#[command(version)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create the database and schema if absent
    Init,
    /// Print register and program statistics
    Stats,
    /// Export a table as CSV
    Export {
        /// Which table to export
        #[arg(long, value_enum)]
        table: ExportTable,
        /// Output file (stdout if omitted)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Restrict visits export to one resident
        #[arg(long)]
        resident: Option<String>,
    },
    /// Snapshot the database file
    Backup {
        /// Destination file
        #[arg(long)]
        out: PathBuf,
    },
    /// Replace the database file from a snapshot
    Restore {
        /// Snapshot to restore from
        #[arg(long)]
        from: PathBuf,
    },
    /// Print NCD patients overdue for a checkup
    DueList {
        /// Days without a checkup before a patient is due
        #[arg(long)]
        days: Option<i64>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum ExportTable {
    Residents,
    Visits,
    MedicalHistory,
    Growth,
    Maternal,
    Ncd,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;

    // Initialize logging (to file, stdout stays clean for command output)
    let _log_guard =
        sehat_core::logging::init(&config.logging).context("failed to initialize logging")?;

    let db_path = config.database_path();

    match args.command {
        Command::Init => commands::init(&db_path),
        Command::Stats => {
            let store = open_store(&db_path)?;
            commands::stats(&store)
        }
        Command::Export {
            table,
            out,
            resident,
        } => {
            let store = open_store(&db_path)?;
            let data = match table {
                ExportTable::Residents => store.residents_table(),
                ExportTable::Visits => store.visits_table(resident.as_deref()),
                ExportTable::MedicalHistory => store.medical_history_table(),
                ExportTable::Growth => store.growth_table(),
                ExportTable::Maternal => store.maternal_table(),
                ExportTable::Ncd => store.ncd_table(),
            };
            commands::export(&data, out.as_deref())
        }
        Command::Backup { out } => commands::backup(&db_path, &out),
        Command::Restore { from } => commands::restore(&from, &db_path),
        Command::DueList { days } => {
            let store = open_store(&db_path)?;
            let days = days.unwrap_or(config.clinical.ncd_due_days);
            commands::due_list(&store, days)
        }
    }
}

fn open_store(db_path: &std::path::Path) -> Result<RecordsStore> {
    tracing::info!(path = %db_path.display(), "Opening database");
    let store = RecordsStore::open(db_path).context("failed to open database")?;
    store.migrate().context("failed to run database migrations")?;
    Ok(store)
}
