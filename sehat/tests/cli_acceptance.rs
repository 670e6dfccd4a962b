//! End-to-end tests for the sehat CLI binary.
//!
//! Each test runs the compiled binary inside an isolated HOME/XDG
//! environment so nothing touches the developer's real data.

use chrono::{Duration, NaiveDate, Utc};
use sehat_core::types::*;
use sehat_core::RecordsStore;
use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;
use std::process::{Command, Output};
use tempfile::TempDir;

struct CliTestEnv {
    _temp_dir: TempDir,
    home: PathBuf,
    xdg_data: PathBuf,
    xdg_config: PathBuf,
    xdg_state: PathBuf,
}

impl CliTestEnv {
    fn new() -> Self {
        let temp_dir = TempDir::new().expect("failed to create temp dir");
        let base = temp_dir.path().to_path_buf();
        let home = base.join("home");
        let xdg_data = base.join("xdg-data");
        let xdg_config = base.join("xdg-config");
        let xdg_state = base.join("xdg-state");

        fs::create_dir_all(&home).expect("failed to create HOME");
        fs::create_dir_all(&xdg_data).expect("failed to create XDG_DATA_HOME");
        fs::create_dir_all(&xdg_config).expect("failed to create XDG_CONFIG_HOME");
        fs::create_dir_all(&xdg_state).expect("failed to create XDG_STATE_HOME");

        Self {
            _temp_dir: temp_dir,
            home,
            xdg_data,
            xdg_config,
            xdg_state,
        }
    }

    fn db_path(&self) -> PathBuf {
        self.xdg_data.join("sehat/records.db")
    }

    fn scratch(&self, name: &str) -> PathBuf {
        self.home.join(name)
    }

    /// Seed the register through the core library, as a UI caller would
    fn seed_store(&self) -> RecordsStore {
        let store = RecordsStore::open(&self.db_path()).expect("failed to open seed db");
        store.migrate().expect("failed to migrate seed db");
        store
    }
}

fn run_cli(env: &CliTestEnv, args: &[&str]) -> Output {
    let bin_path = PathBuf::from(assert_cmd::cargo::cargo_bin!("sehat"));

    Command::new(bin_path)
        .args(args)
        .env("HOME", &env.home)
        .env("XDG_DATA_HOME", &env.xdg_data)
        .env("XDG_CONFIG_HOME", &env.xdg_config)
        .env("XDG_STATE_HOME", &env.xdg_state)
        .output()
        .unwrap_or_else(|e| panic!("failed to execute sehat: {e}"))
}

fn assert_success(args: &[&str], output: &Output) {
    if output.status.success() {
        return;
    }

    let rendered_args = args
        .iter()
        .map(|arg| OsString::from(arg).to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join(" ");
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    panic!(
        "sehat {rendered_args} failed\nstatus: {}\nstdout:\n{}\nstderr:\n{}",
        output.status, stdout, stderr
    );
}

fn sample_resident(id: &str, name: &str) -> Resident {
    Resident {
        unique_id: id.to_string(),
        name: name.to_string(),
        age: Some(32),
        gender: Some(Gender::Female),
        address: None,
        phone: None,
        village_area: Some("East Hamlet".to_string()),
        photo_path: None,
        registration_date: NaiveDate::from_ymd_opt(2026, 1, 15).unwrap(),
        registered_by: "chw-01".to_string(),
        samagra_id: None,
        aadhaar_no: None,
    }
}

#[test]
fn init_creates_database_and_is_idempotent() {
    let env = CliTestEnv::new();

    let output = run_cli(&env, &["init"]);
    assert_success(&["init"], &output);

    let db_path = env.db_path();
    assert!(
        db_path.exists(),
        "database file should exist at {}",
        db_path.display()
    );

    // Second run must succeed against the existing schema
    let output = run_cli(&env, &["init"]);
    assert_success(&["init"], &output);
}

#[test]
fn stats_reports_register_counts() {
    let env = CliTestEnv::new();
    {
        let store = env.seed_store();
        assert!(store.add_resident(&sample_resident("VH-2026-0001", "Asha Devi")));
        assert!(store.add_resident(&sample_resident("VH-2026-0002", "Ram Singh")));

        let visit = Visit {
            visit_id: None,
            resident_id: "VH-2026-0001".to_string(),
            visit_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            visit_time: "10:30".to_string(),
            health_worker: "chw-01".to_string(),
            bp_systolic: Some(120),
            bp_diastolic: Some(80),
            temperature: None,
            pulse: None,
            weight: Some(55.0),
            height: Some(160.0),
            bmi: None,
            spo2: None,
            complaints: None,
            observations: None,
            photo_paths: vec![],
        };
        assert!(store.add_visit(&visit));
    }

    let output = run_cli(&env, &["stats"]);
    assert_success(&["stats"], &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Residents:  2"), "stdout:\n{stdout}");
    assert!(stdout.contains("Visits:     1"), "stdout:\n{stdout}");
    assert!(stdout.contains("chw-01"), "stdout:\n{stdout}");
}

#[test]
fn export_residents_writes_quoted_csv() {
    let env = CliTestEnv::new();
    {
        let store = env.seed_store();
        assert!(store.add_resident(&sample_resident("VH-2026-0001", "Devi, Asha")));
    }

    let out = env.scratch("residents.csv");
    let out_str = out.to_string_lossy().into_owned();
    let args = ["export", "--table", "residents", "--out", &out_str];
    let output = run_cli(&env, &args);
    assert_success(&args, &output);

    let csv = fs::read_to_string(&out).expect("export file should exist");
    let mut lines = csv.lines();
    assert!(lines.next().unwrap().starts_with("unique_id,name,"));
    let row = lines.next().unwrap();
    assert!(row.starts_with("VH-2026-0001,\"Devi, Asha\""), "row: {row}");
}

#[test]
fn export_visits_to_stdout() {
    let env = CliTestEnv::new();
    {
        let store = env.seed_store();
        assert!(store.add_resident(&sample_resident("VH-2026-0001", "Asha Devi")));
    }

    let args = ["export", "--table", "visits"];
    let output = run_cli(&env, &args);
    assert_success(&args, &output);

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("visit_id,resident_id,"), "stdout:\n{stdout}");
}

#[test]
fn backup_and_restore_round_trip() {
    let env = CliTestEnv::new();
    {
        let store = env.seed_store();
        assert!(store.add_resident(&sample_resident("VH-2026-0001", "Asha Devi")));
    }

    let snapshot = env.scratch("backup.db");
    let snapshot_str = snapshot.to_string_lossy().into_owned();
    let args = ["backup", "--out", &snapshot_str];
    let output = run_cli(&env, &args);
    assert_success(&args, &output);
    assert!(snapshot.exists());

    // Mutate the live database after the snapshot
    {
        let store = env.seed_store();
        assert!(store.add_resident(&sample_resident("VH-2026-0002", "Ram Singh")));
        assert_eq!(store.resident_count(), 2);
    }

    let args = ["restore", "--from", &snapshot_str];
    let output = run_cli(&env, &args);
    assert_success(&args, &output);

    let store = env.seed_store();
    assert_eq!(store.resident_count(), 1);
    assert!(store.get_resident("VH-2026-0002").is_none());
}

#[test]
fn restore_rejects_non_database_file() {
    let env = CliTestEnv::new();
    run_cli(&env, &["init"]);

    let junk = env.scratch("junk.db");
    fs::write(&junk, "not a database").unwrap();
    let junk_str = junk.to_string_lossy().into_owned();

    let output = run_cli(&env, &["restore", "--from", &junk_str]);
    assert!(
        !output.status.success(),
        "restore from junk should fail, stdout:\n{}",
        String::from_utf8_lossy(&output.stdout)
    );

    // Live database untouched
    let store = env.seed_store();
    assert_eq!(store.resident_count(), 0);
}

#[test]
fn due_list_reports_overdue_patients() {
    let env = CliTestEnv::new();
    let today = Utc::now().date_naive();
    {
        let store = env.seed_store();
        assert!(store.add_resident(&sample_resident("VH-2026-0001", "Ram Singh")));
        let checkup = NcdCheckup {
            id: None,
            resident_id: "VH-2026-0001".to_string(),
            checkup_date: today - Duration::days(45),
            condition_type: Some("Hypertension".to_string()),
            bp_systolic: Some(150),
            bp_diastolic: Some(92),
            fasting_blood_sugar: None,
            random_blood_sugar: None,
            medication_adherence: Some("Partial".to_string()),
            symptoms: None,
            referral_needed: false,
            assessment: None,
        };
        assert!(store.add_ncd_checkup(&checkup));
    }

    let output = run_cli(&env, &["due-list"]);
    assert_success(&["due-list"], &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("VH-2026-0001"), "stdout:\n{stdout}");
    assert!(stdout.contains("45"), "stdout:\n{stdout}");

    // A wider threshold empties the list
    let output = run_cli(&env, &["due-list", "--days", "60"]);
    assert_success(&["due-list", "--days", "60"], &output);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("No NCD patients overdue"), "stdout:\n{stdout}");
}
