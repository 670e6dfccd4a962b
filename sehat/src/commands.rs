//! Subcommand implementations for the sehat CLI.

use anyhow::{bail, Context, Result};
use sehat_core::analytics;
use sehat_core::types::DataTable;
use sehat_core::RecordsStore;
use std::io::Write;
use std::path::Path;

/// Create the database file and schema if absent.
pub fn init(db_path: &Path) -> Result<()> {
    let store = RecordsStore::open(db_path).context("failed to open database")?;
    store.migrate().context("failed to run database migrations")?;

    println!("Database ready: {}", db_path.display());
    Ok(())
}

/// Print register and program statistics.
pub fn stats(store: &RecordsStore) -> Result<()> {
    println!("Residents:  {}", store.resident_count());
    println!("Visits:     {}", store.visit_count());

    let demographics = store.demographics_summary();
    if !demographics.gender_distribution.is_empty() {
        println!("\nBy gender:");
        for (gender, count) in &demographics.gender_distribution {
            println!("  {:<8} {}", gender, count);
        }
    }
    let ages = &demographics.age_groups;
    println!("\nBy age:");
    println!("  0-17     {}", ages.child);
    println!("  18-39    {}", ages.adult);
    println!("  40-59    {}", ages.middle_age);
    println!("  60+      {}", ages.senior);

    let child = analytics::child_health_stats(store);
    println!("\nChild health:");
    println!("  Under 5              {}", child.under_five_count);
    println!("  Underweight          {}", child.underweight_count);
    println!("  Severe MUAC          {}", child.severe_muac_count);

    let maternal = analytics::maternal_health_stats(store);
    println!("\nMaternal health:");
    println!("  Active pregnancies   {}", maternal.active_pregnancies);
    println!("  ANC visits           {}", maternal.anc_visit_count);
    println!("  PNC visits           {}", maternal.pnc_visit_count);
    println!("  High-risk mothers    {}", maternal.high_risk_count);

    let ncd = analytics::ncd_stats(store);
    println!("\nNCD follow-up:");
    println!("  Patients             {}", ncd.patient_count);
    println!("  Referrals            {}", ncd.referral_count);

    let workers = store.visits_by_health_worker();
    if !workers.is_empty() {
        println!("\nVisits by health worker:");
        for (worker, count) in workers {
            println!("  {:<20} {}", worker, count);
        }
    }

    Ok(())
}

/// Write a table as CSV to a file, or stdout when no path is given.
pub fn export(table: &DataTable, out: Option<&Path>) -> Result<()> {
    match out {
        Some(path) => {
            let mut file = std::fs::File::create(path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            write_csv(table, &mut file)?;
            println!("Exported {} row(s) to {}", table.rows.len(), path.display());
        }
        None => {
            let stdout = std::io::stdout();
            write_csv(table, &mut stdout.lock())?;
        }
    }
    Ok(())
}

fn write_csv<W: Write>(table: &DataTable, writer: &mut W) -> Result<()> {
    let header: Vec<String> = table.columns.iter().map(|c| csv_field(c)).collect();
    writeln!(writer, "{}", header.join(","))?;

    for row in &table.rows {
        let cells: Vec<String> = row.iter().map(|c| csv_field(c)).collect();
        writeln!(writer, "{}", cells.join(","))?;
    }
    Ok(())
}

/// Quote a CSV field per RFC 4180 when it contains delimiters or quotes.
fn csv_field(value: &str) -> String {
    if value.contains(',') || value.contains('"') || value.contains('\n') || value.contains('\r') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// Snapshot the database file.
pub fn backup(db_path: &Path, out: &Path) -> Result<()> {
    if !db_path.exists() {
        bail!("no database at {}", db_path.display());
    }
    if let Some(parent) = out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }

    std::fs::copy(db_path, out)
        .with_context(|| format!("failed to copy database to {}", out.display()))?;
    tracing::info!(from = %db_path.display(), to = %out.display(), "Backup complete");
    println!("Backup written to {}", out.display());
    Ok(())
}

/// Replace the database file from a snapshot.
///
/// The snapshot must at least open and pass migrations before the live
/// file is overwritten.
pub fn restore(from: &Path, db_path: &Path) -> Result<()> {
    if !from.exists() {
        bail!("no snapshot at {}", from.display());
    }

    let snapshot = RecordsStore::open(from)
        .with_context(|| format!("snapshot {} is not a readable database", from.display()))?;
    snapshot
        .migrate()
        .with_context(|| format!("snapshot {} has an unusable schema", from.display()))?;
    drop(snapshot);

    if let Some(parent) = db_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    std::fs::copy(from, db_path)
        .with_context(|| format!("failed to restore to {}", db_path.display()))?;

    // Stale WAL/SHM sidecars would shadow the restored file
    for suffix in ["-wal", "-shm"] {
        let mut sidecar = db_path.as_os_str().to_owned();
        sidecar.push(suffix);
        let sidecar = std::path::PathBuf::from(sidecar);
        if sidecar.exists() {
            std::fs::remove_file(&sidecar)
                .with_context(|| format!("failed to remove {}", sidecar.display()))?;
        }
    }

    tracing::info!(from = %from.display(), to = %db_path.display(), "Restore complete");
    println!("Restored database from {}", from.display());
    Ok(())
}

/// Print the NCD due list.
pub fn due_list(store: &RecordsStore, days: i64) -> Result<()> {
    let due = store.ncd_due_list(days);

    if due.is_empty() {
        println!("No NCD patients overdue past {} day(s)", days);
        return Ok(());
    }

    println!(
        "{:<14} {:<24} {:<16} {:<12} {}",
        "ID", "Name", "Condition", "Last check", "Days overdue"
    );
    for entry in due {
        println!(
            "{:<14} {:<24} {:<16} {:<12} {}",
            entry.resident_id,
            entry.resident_name,
            entry.condition_type.as_deref().unwrap_or("-"),
            entry.last_checkup,
            entry.days_overdue
        );
    }
    Ok(())
}
