//! Database schema and migrations
//!
//! Uses SQLite with embedded migrations managed via PRAGMA user_version.
//! Dates are stored as `YYYY-MM-DD` text so lexicographic order matches
//! chronological order; timestamps are RFC 3339 text.

use rusqlite::Connection;

/// Current schema version
pub const SCHEMA_VERSION: i32 = 1;

/// SQL migrations, indexed by version number
const MIGRATIONS: &[&str] = &[
    // Version 1: Initial schema
    r#"
    -- ============================================
    -- Core register
    -- ============================================

    CREATE TABLE IF NOT EXISTS residents (
        unique_id         TEXT PRIMARY KEY,   -- VH-YYYY-NNNN
        name              TEXT NOT NULL,
        age               INTEGER,
        gender            TEXT,
        address           TEXT,
        phone             TEXT,
        village_area      TEXT,
        photo_path        TEXT,               -- opaque reference, resolved by callers
        registration_date TEXT NOT NULL,
        registered_by     TEXT NOT NULL,
        samagra_id        TEXT,
        aadhaar_no        TEXT
    );

    CREATE TABLE IF NOT EXISTS visits (
        visit_id      INTEGER PRIMARY KEY AUTOINCREMENT,
        resident_id   TEXT NOT NULL REFERENCES residents(unique_id),
        visit_date    TEXT NOT NULL,
        visit_time    TEXT NOT NULL,
        health_worker TEXT NOT NULL,
        bp_systolic   INTEGER,
        bp_diastolic  INTEGER,
        temperature   REAL,
        pulse         INTEGER,
        weight        REAL,
        height        REAL,
        bmi           REAL,                   -- computed at write time
        spo2          INTEGER,
        complaints    TEXT,
        observations  TEXT,
        photo_paths   TEXT                    -- comma-delimited, ordered
    );

    CREATE TABLE IF NOT EXISTS medical_history (
        history_id          INTEGER PRIMARY KEY AUTOINCREMENT,
        resident_id         TEXT NOT NULL UNIQUE REFERENCES residents(unique_id),
        chronic_conditions  TEXT,
        past_diagnoses      TEXT,
        current_medications TEXT,
        allergies           TEXT,
        family_history      TEXT,
        notes               TEXT,
        last_updated        TEXT NOT NULL,
        updated_by          TEXT NOT NULL
    );

    -- ============================================
    -- Follow-up modules
    -- ============================================

    CREATE TABLE IF NOT EXISTS growth_monitoring (
        id                     INTEGER PRIMARY KEY AUTOINCREMENT,
        resident_id            TEXT NOT NULL REFERENCES residents(unique_id),
        record_date            TEXT NOT NULL,
        age_months             INTEGER,
        weight_kg              REAL,
        height_cm              REAL,
        muac_cm                REAL,
        head_circumference_cm  REAL,
        z_score_weight_age     REAL,
        notes                  TEXT,
        assessment_data        JSON
    );

    CREATE TABLE IF NOT EXISTS maternal_health (
        id                  INTEGER PRIMARY KEY AUTOINCREMENT,
        resident_id         TEXT NOT NULL REFERENCES residents(unique_id),
        pregnancy_id        TEXT,
        visit_type          TEXT NOT NULL CHECK (visit_type IN ('ANC', 'PNC')),
        visit_date          TEXT NOT NULL,
        lmp_date            TEXT,
        edd_date            TEXT,
        gestational_week    INTEGER,
        fundal_height       REAL,
        fetal_heart_rate    INTEGER,
        urine_albumin       TEXT,
        hemoglobin          REAL,
        tt_dose             INTEGER,
        calcium_iron_status TEXT,
        danger_signs        TEXT,
        bp_systolic         INTEGER,
        bp_diastolic        INTEGER,
        delivery_outcome    TEXT,
        assessment_data     JSON
    );

    CREATE TABLE IF NOT EXISTS ncd_followup (
        id                   INTEGER PRIMARY KEY AUTOINCREMENT,
        resident_id          TEXT NOT NULL REFERENCES residents(unique_id),
        checkup_date         TEXT NOT NULL,
        condition_type       TEXT,
        bp_systolic          INTEGER,
        bp_diastolic         INTEGER,
        fasting_blood_sugar  REAL,
        random_blood_sugar   REAL,
        medication_adherence TEXT,
        symptoms             TEXT,
        referral_needed      INTEGER NOT NULL DEFAULT 0,
        assessment_data      JSON
    );

    CREATE TABLE IF NOT EXISTS child_assessment (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        resident_id     TEXT NOT NULL REFERENCES residents(unique_id),
        assessment_date TEXT NOT NULL,
        age_months      INTEGER,
        checklist       JSON,
        notes           TEXT
    );

    -- ============================================
    -- Household proforma (standalone survey)
    -- ============================================

    CREATE TABLE IF NOT EXISTS household_proforma (
        id              INTEGER PRIMARY KEY AUTOINCREMENT,
        household_no    TEXT NOT NULL,
        head_name       TEXT,
        village_area    TEXT,
        visit_date      TEXT NOT NULL,
        total_members   INTEGER,
        notes           TEXT,
        assessment_data JSON
    );

    CREATE TABLE IF NOT EXISTS household_members (
        id           INTEGER PRIMARY KEY AUTOINCREMENT,
        household_id INTEGER NOT NULL REFERENCES household_proforma(id),
        sl_no        INTEGER NOT NULL,
        name         TEXT NOT NULL,
        age          INTEGER,
        gender       TEXT,
        relation     TEXT,
        remarks      TEXT
    );

    -- ============================================
    -- Indexes
    -- ============================================

    CREATE INDEX IF NOT EXISTS idx_visits_resident ON visits(resident_id);
    CREATE INDEX IF NOT EXISTS idx_visits_date ON visits(visit_date DESC);
    CREATE INDEX IF NOT EXISTS idx_medical_history_resident ON medical_history(resident_id);
    CREATE INDEX IF NOT EXISTS idx_growth_monitoring_resident ON growth_monitoring(resident_id);
    CREATE INDEX IF NOT EXISTS idx_maternal_health_resident ON maternal_health(resident_id);
    CREATE INDEX IF NOT EXISTS idx_ncd_followup_resident ON ncd_followup(resident_id);
    CREATE INDEX IF NOT EXISTS idx_ncd_followup_date ON ncd_followup(checkup_date DESC);
    CREATE INDEX IF NOT EXISTS idx_child_assessment_resident ON child_assessment(resident_id);
    CREATE INDEX IF NOT EXISTS idx_household_members_household ON household_members(household_id);
    CREATE INDEX IF NOT EXISTS idx_residents_samagra_id ON residents(samagra_id);
    "#,
];

/// Run all pending migrations
pub fn run_migrations(conn: &Connection) -> crate::error::Result<()> {
    let current_version: i32 = conn
        .query_row("PRAGMA user_version", [], |r| r.get(0))
        .unwrap_or(0);

    tracing::info!(
        current_version,
        target_version = SCHEMA_VERSION,
        "Checking database migrations"
    );

    for (i, migration) in MIGRATIONS.iter().enumerate() {
        let version = (i + 1) as i32;
        if version > current_version {
            tracing::info!(version, "Running migration");
            conn.execute_batch(migration)?;
            conn.execute(&format!("PRAGMA user_version = {}", version), [])?;
        }
    }

    if current_version < SCHEMA_VERSION {
        tracing::info!(
            from = current_version,
            to = SCHEMA_VERSION,
            "Migrations complete"
        );
    }

    Ok(())
}

/// Get the current schema version from the database
pub fn get_schema_version(conn: &Connection) -> crate::error::Result<i32> {
    let version: i32 = conn.query_row("PRAGMA user_version", [], |r| r.get(0))?;
    Ok(version)
}
