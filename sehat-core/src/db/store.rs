//! Records store: CRUD, search, and aggregate operations over the register.
//!
//! Every public operation is self-contained: it takes the connection, runs
//! one statement (or one short transaction) and returns. Failures never
//! escape to callers as errors; mutating operations answer `false`, point
//! lookups `None`, collection reads an empty `Vec`, counts `0` — with the
//! underlying cause logged for operator diagnosis. The `try_*` private
//! layer carries the real `Result`s.

use crate::clinical;
use crate::error::{Error, Result};
use crate::ids;
use crate::types::*;
use chrono::{Datelike, NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::Mutex;

/// Store handle over a single SQLite connection
pub struct RecordsStore {
    conn: Mutex<Connection>,
}

/// Boundary translation: log the failure, return the safe default.
fn or_default<T: Default>(op: &'static str, result: Result<T>) -> T {
    match result {
        Ok(v) => v,
        Err(e) => {
            tracing::error!(error = %e, op, "store operation failed");
            T::default()
        }
    }
}

/// Lenient date parse for rows written by older tooling
fn parse_date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap_or_else(|_| Utc::now().date_naive())
}

fn parse_date_opt(s: Option<String>) -> Option<NaiveDate> {
    s.and_then(|s| NaiveDate::parse_from_str(&s, "%Y-%m-%d").ok())
}

fn parse_json_opt(s: Option<String>) -> Option<serde_json::Value> {
    s.and_then(|s| serde_json::from_str(&s).ok())
}

impl RecordsStore {
    /// Open or create a database at the given path
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;

        // Foreign keys enforce the resident references; WAL lets readers
        // proceed while a health worker is saving a form.
        conn.execute_batch(
            "
            PRAGMA foreign_keys = ON;
            PRAGMA journal_mode = WAL;
            PRAGMA synchronous = NORMAL;
            ",
        )?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute("PRAGMA foreign_keys = ON", [])?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Idempotently create all tables and indexes; safe on every start
    pub fn migrate(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        super::schema::run_migrations(&conn)
    }

    /// Get the underlying connection (for advanced use)
    pub fn connection(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap()
    }

    // ============================================
    // Resident operations
    // ============================================

    /// Insert one resident; `false` on duplicate id or constraint violation
    pub fn add_resident(&self, resident: &Resident) -> bool {
        or_default(
            "add_resident",
            self.try_add_resident(resident).map(|_| true),
        )
    }

    fn try_add_resident(&self, resident: &Resident) -> Result<()> {
        if resident.name.trim().is_empty() {
            return Err(Error::Validation("resident name is required".into()));
        }
        if !ids::is_valid_resident_id(&resident.unique_id) {
            return Err(Error::Validation(format!(
                "malformed resident id: {}",
                resident.unique_id
            )));
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO residents (unique_id, name, age, gender, address, phone, village_area,
                                   photo_path, registration_date, registered_by, samagra_id, aadhaar_no)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12)
            "#,
            params![
                resident.unique_id,
                resident.name,
                resident.age,
                resident.gender.map(|g| g.as_str()),
                resident.address,
                resident.phone,
                resident.village_area,
                resident.photo_path,
                resident.registration_date.to_string(),
                resident.registered_by,
                resident.samagra_id,
                resident.aadhaar_no,
            ],
        )?;
        Ok(())
    }

    /// Amend a resident's fields; the id itself is immutable
    pub fn update_resident(&self, resident: &Resident) -> bool {
        or_default(
            "update_resident",
            self.try_update_resident(resident).map(|_| true),
        )
    }

    fn try_update_resident(&self, resident: &Resident) -> Result<()> {
        if resident.name.trim().is_empty() {
            return Err(Error::Validation("resident name is required".into()));
        }

        let conn = self.conn.lock().unwrap();
        let updated = conn.execute(
            r#"
            UPDATE residents
            SET name = ?2, age = ?3, gender = ?4, address = ?5, phone = ?6,
                village_area = ?7, photo_path = ?8, registered_by = ?9,
                samagra_id = ?10, aadhaar_no = ?11
            WHERE unique_id = ?1
            "#,
            params![
                resident.unique_id,
                resident.name,
                resident.age,
                resident.gender.map(|g| g.as_str()),
                resident.address,
                resident.phone,
                resident.village_area,
                resident.photo_path,
                resident.registered_by,
                resident.samagra_id,
                resident.aadhaar_no,
            ],
        )?;

        if updated == 0 {
            return Err(Error::ResidentNotFound(resident.unique_id.clone()));
        }
        Ok(())
    }

    /// Point lookup by primary key
    pub fn get_resident(&self, unique_id: &str) -> Option<Resident> {
        or_default("get_resident", self.try_get_resident(unique_id))
    }

    fn try_get_resident(&self, unique_id: &str) -> Result<Option<Resident>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT * FROM residents WHERE unique_id = ?",
            [unique_id],
            Self::row_to_resident,
        )
        .optional()
        .map_err(Error::from)
    }

    /// Full scan, newest registrations first
    pub fn get_all_residents(&self) -> Vec<Resident> {
        or_default("get_all_residents", self.try_get_all_residents())
    }

    fn try_get_all_residents(&self) -> Result<Vec<Resident>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT * FROM residents ORDER BY registration_date DESC, unique_id DESC",
        )?;
        let residents = stmt
            .query_map([], Self::row_to_resident)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(residents)
    }

    /// Case-insensitive substring match against id and name. `%` and `_`
    /// in the term match themselves, not as wildcards.
    ///
    /// A blank or whitespace-only term returns nothing: a cleared search
    /// box must not dump the whole register.
    pub fn search_residents(&self, term: &str) -> Vec<Resident> {
        let term = term.trim();
        if term.is_empty() {
            return Vec::new();
        }
        or_default("search_residents", self.try_search_residents(term))
    }

    fn try_search_residents(&self, term: &str) -> Result<Vec<Resident>> {
        // Cap pathological input from the search box
        let term: String = term.chars().filter(|c| *c != '\0').take(100).collect();
        // LIKE metacharacters in the term match literally
        let escaped = term
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{}%", escaped);

        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM residents
            WHERE unique_id LIKE ?1 ESCAPE '\' OR name LIKE ?1 ESCAPE '\'
            ORDER BY name ASC
            "#,
        )?;
        let residents = stmt
            .query_map([pattern], Self::row_to_resident)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(residents)
    }

    /// Conjunctive filter; unset criteria are unconstrained
    pub fn filter_residents(&self, filter: &ResidentFilter) -> Vec<Resident> {
        or_default("filter_residents", self.try_filter_residents(filter))
    }

    fn try_filter_residents(&self, filter: &ResidentFilter) -> Result<Vec<Resident>> {
        let conn = self.conn.lock().unwrap();

        let mut sql = String::from("SELECT * FROM residents WHERE 1=1");
        let mut params: Vec<Box<dyn rusqlite::ToSql>> = vec![];

        if let Some(gender) = &filter.gender {
            sql.push_str(" AND gender = ?");
            params.push(Box::new(gender.as_str().to_string()));
        }

        if let Some(age_min) = filter.age_min {
            sql.push_str(" AND age >= ?");
            params.push(Box::new(age_min));
        }

        if let Some(age_max) = filter.age_max {
            sql.push_str(" AND age <= ?");
            params.push(Box::new(age_max));
        }

        if let Some(village_area) = &filter.village_area {
            sql.push_str(" AND village_area = ?");
            params.push(Box::new(village_area.clone()));
        }

        sql.push_str(" ORDER BY name ASC");

        let params_refs: Vec<&dyn rusqlite::ToSql> = params.iter().map(|p| p.as_ref()).collect();

        let mut stmt = conn.prepare(&sql)?;
        let residents = stmt
            .query_map(params_refs.as_slice(), Self::row_to_resident)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(residents)
    }

    /// Existence check, the precondition for id allocation
    pub fn resident_exists(&self, unique_id: &str) -> bool {
        or_default("resident_exists", self.try_resident_exists(unique_id))
    }

    fn try_resident_exists(&self, unique_id: &str) -> Result<bool> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row(
            "SELECT COUNT(*) FROM residents WHERE unique_id = ?",
            [unique_id],
            |r| r.get(0),
        )?;
        Ok(count > 0)
    }

    /// Total registered residents
    pub fn resident_count(&self) -> i64 {
        or_default("resident_count", self.try_resident_count())
    }

    fn try_resident_count(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM residents", [], |r| r.get(0))?;
        Ok(count)
    }

    /// Allocate the next free `VH-YYYY-NNNN` id for the current year.
    ///
    /// Takes the max sequence among this year's ids and probes upward, so
    /// an allocation can never collide with an existing resident.
    pub fn next_resident_id(&self) -> Option<String> {
        or_default("next_resident_id", self.try_next_resident_id().map(Some))
    }

    fn try_next_resident_id(&self) -> Result<String> {
        let year = Utc::now().year();
        let prefix = format!("VH-{}-%", year);

        let ids: Vec<String> = {
            let conn = self.conn.lock().unwrap();
            let mut stmt = conn.prepare("SELECT unique_id FROM residents WHERE unique_id LIKE ?")?;
            let ids = stmt
                .query_map([prefix], |row| row.get(0))?
                .collect::<std::result::Result<Vec<_>, _>>()?;
            ids
        };

        let max_seq = ids
            .iter()
            .filter_map(|id| ids::parse_sequence(id))
            .max()
            .unwrap_or(0);

        let mut sequence = max_seq + 1;
        loop {
            let candidate = ids::format_resident_id(year, sequence);
            if !self.try_resident_exists(&candidate)? {
                return Ok(candidate);
            }
            sequence += 1;
        }
    }

    fn row_to_resident(row: &Row) -> rusqlite::Result<Resident> {
        let gender_str: Option<String> = row.get("gender")?;
        let registration_date_str: String = row.get("registration_date")?;

        Ok(Resident {
            unique_id: row.get("unique_id")?,
            name: row.get("name")?,
            age: row.get("age")?,
            gender: gender_str.and_then(|s| s.parse().ok()),
            address: row.get("address")?,
            phone: row.get("phone")?,
            village_area: row.get("village_area")?,
            photo_path: row.get("photo_path")?,
            registration_date: parse_date(&registration_date_str),
            registered_by: row.get("registered_by")?,
            samagra_id: row.get("samagra_id")?,
            aadhaar_no: row.get("aadhaar_no")?,
        })
    }

    // ============================================
    // Visit operations
    // ============================================

    /// Append one checkup. The referenced resident must exist; BMI is
    /// recomputed here from weight and height, whatever the caller set.
    pub fn add_visit(&self, visit: &Visit) -> bool {
        or_default("add_visit", self.try_add_visit(visit).map(|_| true))
    }

    fn try_add_visit(&self, visit: &Visit) -> Result<()> {
        if !self.try_resident_exists(&visit.resident_id)? {
            return Err(Error::ResidentNotFound(visit.resident_id.clone()));
        }

        let bmi = compute_bmi(visit.weight, visit.height);

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO visits (resident_id, visit_date, visit_time, health_worker,
                                bp_systolic, bp_diastolic, temperature, pulse, weight, height,
                                bmi, spo2, complaints, observations, photo_paths)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
            "#,
            params![
                visit.resident_id,
                visit.visit_date.to_string(),
                visit.visit_time,
                visit.health_worker,
                visit.bp_systolic,
                visit.bp_diastolic,
                visit.temperature,
                visit.pulse,
                visit.weight,
                visit.height,
                bmi,
                visit.spo2,
                visit.complaints,
                visit.observations,
                visit.photo_paths.join(","),
            ],
        )?;
        Ok(())
    }

    /// All visits for a resident, most recent first.
    ///
    /// The descending order is guaranteed here, not by callers: the
    /// "recent history" views depend on it.
    pub fn get_resident_visits(&self, resident_id: &str) -> Vec<Visit> {
        or_default(
            "get_resident_visits",
            self.try_get_resident_visits(resident_id),
        )
    }

    fn try_get_resident_visits(&self, resident_id: &str) -> Result<Vec<Visit>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT * FROM visits
            WHERE resident_id = ?
            ORDER BY visit_date DESC, visit_time DESC, visit_id DESC
            "#,
        )?;
        let visits = stmt
            .query_map([resident_id], Self::row_to_visit)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(visits)
    }

    /// All visits across residents, most recent first
    pub fn get_all_visits(&self) -> Vec<Visit> {
        or_default("get_all_visits", self.try_get_all_visits())
    }

    fn try_get_all_visits(&self) -> Result<Vec<Visit>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT * FROM visits ORDER BY visit_date DESC, visit_time DESC, visit_id DESC",
        )?;
        let visits = stmt
            .query_map([], Self::row_to_visit)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(visits)
    }

    /// Most recent visits across all residents, joined with resident names
    pub fn get_recent_visits(&self, limit: usize) -> Vec<VisitWithResident> {
        or_default("get_recent_visits", self.try_get_recent_visits(limit))
    }

    fn try_get_recent_visits(&self, limit: usize) -> Result<Vec<VisitWithResident>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT v.*, r.name AS resident_name
            FROM visits v
            LEFT JOIN residents r ON r.unique_id = v.resident_id
            ORDER BY v.visit_date DESC, v.visit_time DESC, v.visit_id DESC
            LIMIT ?
            "#,
        )?;
        let visits = stmt
            .query_map([limit as i64], |row| {
                Ok(VisitWithResident {
                    visit: Self::row_to_visit(row)?,
                    resident_name: row.get("resident_name")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(visits)
    }

    /// Total recorded visits
    pub fn visit_count(&self) -> i64 {
        or_default("visit_count", self.try_visit_count())
    }

    fn try_visit_count(&self) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM visits", [], |r| r.get(0))?;
        Ok(count)
    }

    /// Visit counts grouped by health worker, busiest first
    pub fn visits_by_health_worker(&self) -> Vec<(String, i64)> {
        or_default(
            "visits_by_health_worker",
            self.try_visits_by_health_worker(),
        )
    }

    fn try_visits_by_health_worker(&self) -> Result<Vec<(String, i64)>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            r#"
            SELECT health_worker, COUNT(*) AS n
            FROM visits
            GROUP BY health_worker
            ORDER BY n DESC, health_worker ASC
            "#,
        )?;
        let counts = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(counts)
    }

    fn row_to_visit(row: &Row) -> rusqlite::Result<Visit> {
        let visit_date_str: String = row.get("visit_date")?;
        let photo_paths_str: Option<String> = row.get("photo_paths")?;

        Ok(Visit {
            visit_id: row.get("visit_id")?,
            resident_id: row.get("resident_id")?,
            visit_date: parse_date(&visit_date_str),
            visit_time: row.get("visit_time")?,
            health_worker: row.get("health_worker")?,
            bp_systolic: row.get("bp_systolic")?,
            bp_diastolic: row.get("bp_diastolic")?,
            temperature: row.get("temperature")?,
            pulse: row.get("pulse")?,
            weight: row.get("weight")?,
            height: row.get("height")?,
            bmi: row.get("bmi")?,
            spo2: row.get("spo2")?,
            complaints: row.get("complaints")?,
            observations: row.get("observations")?,
            photo_paths: photo_paths_str
                .map(|s| {
                    s.split(',')
                        .filter(|p| !p.is_empty())
                        .map(|p| p.to_string())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    // ============================================
    // Medical history operations
    // ============================================

    /// Upsert keyed on `resident_id`: at most one current row per resident
    pub fn upsert_medical_history(&self, history: &MedicalHistory) -> bool {
        or_default(
            "upsert_medical_history",
            self.try_upsert_medical_history(history).map(|_| true),
        )
    }

    fn try_upsert_medical_history(&self, history: &MedicalHistory) -> Result<()> {
        if !self.try_resident_exists(&history.resident_id)? {
            return Err(Error::ResidentNotFound(history.resident_id.clone()));
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO medical_history (resident_id, chronic_conditions, past_diagnoses,
                                         current_medications, allergies, family_history,
                                         notes, last_updated, updated_by)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
            ON CONFLICT(resident_id) DO UPDATE SET
                chronic_conditions = excluded.chronic_conditions,
                past_diagnoses = excluded.past_diagnoses,
                current_medications = excluded.current_medications,
                allergies = excluded.allergies,
                family_history = excluded.family_history,
                notes = excluded.notes,
                last_updated = excluded.last_updated,
                updated_by = excluded.updated_by
            "#,
            params![
                history.resident_id,
                history.chronic_conditions,
                history.past_diagnoses,
                history.current_medications,
                history.allergies,
                history.family_history,
                history.notes,
                history.last_updated.to_rfc3339(),
                history.updated_by,
            ],
        )?;
        Ok(())
    }

    /// Get the current medical history for a resident
    pub fn get_medical_history(&self, resident_id: &str) -> Option<MedicalHistory> {
        or_default(
            "get_medical_history",
            self.try_get_medical_history(resident_id),
        )
    }

    fn try_get_medical_history(&self, resident_id: &str) -> Result<Option<MedicalHistory>> {
        let conn = self.conn.lock().unwrap();
        conn.query_row(
            "SELECT * FROM medical_history WHERE resident_id = ?",
            [resident_id],
            Self::row_to_history,
        )
        .optional()
        .map_err(Error::from)
    }

    fn row_to_history(row: &Row) -> rusqlite::Result<MedicalHistory> {
        let last_updated_str: String = row.get("last_updated")?;

        Ok(MedicalHistory {
            history_id: row.get("history_id")?,
            resident_id: row.get("resident_id")?,
            chronic_conditions: row.get("chronic_conditions")?,
            past_diagnoses: row.get("past_diagnoses")?,
            current_medications: row.get("current_medications")?,
            allergies: row.get("allergies")?,
            family_history: row.get("family_history")?,
            notes: row.get("notes")?,
            last_updated: chrono::DateTime::parse_from_rfc3339(&last_updated_str)
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|_| Utc::now()),
            updated_by: row.get("updated_by")?,
        })
    }

    // ============================================
    // Growth monitoring operations
    // ============================================

    /// Append a growth record for an under-5 child
    pub fn add_growth_record(&self, record: &GrowthRecord) -> bool {
        or_default(
            "add_growth_record",
            self.try_add_growth_record(record).map(|_| true),
        )
    }

    fn try_add_growth_record(&self, record: &GrowthRecord) -> Result<()> {
        if !self.try_resident_exists(&record.resident_id)? {
            return Err(Error::ResidentNotFound(record.resident_id.clone()));
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO growth_monitoring (resident_id, record_date, age_months, weight_kg,
                                           height_cm, muac_cm, head_circumference_cm,
                                           z_score_weight_age, notes, assessment_data)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
            "#,
            params![
                record.resident_id,
                record.record_date.to_string(),
                record.age_months,
                record.weight_kg,
                record.height_cm,
                record.muac_cm,
                record.head_circumference_cm,
                record.z_score_weight_age,
                record.notes,
                record.assessment.as_ref().map(|v| v.to_string()),
            ],
        )?;
        Ok(())
    }

    /// Growth records for one child, newest first
    pub fn get_growth_records(&self, resident_id: &str) -> Vec<GrowthRecord> {
        or_default(
            "get_growth_records",
            self.try_growth_records(Some(resident_id)),
        )
    }

    /// All growth records, newest first (exports and analytics)
    pub fn all_growth_records(&self) -> Vec<GrowthRecord> {
        or_default("all_growth_records", self.try_growth_records(None))
    }

    fn try_growth_records(&self, resident_id: Option<&str>) -> Result<Vec<GrowthRecord>> {
        let conn = self.conn.lock().unwrap();
        let base = "SELECT * FROM growth_monitoring";
        let order = " ORDER BY record_date DESC, id DESC";

        let rows = match resident_id {
            Some(id) => {
                let mut stmt =
                    conn.prepare(&format!("{} WHERE resident_id = ?{}", base, order))?;
                let rows = stmt
                    .query_map([id], Self::row_to_growth)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!("{}{}", base, order))?;
                let rows = stmt
                    .query_map([], Self::row_to_growth)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };
        Ok(rows)
    }

    fn row_to_growth(row: &Row) -> rusqlite::Result<GrowthRecord> {
        let record_date_str: String = row.get("record_date")?;
        let assessment_str: Option<String> = row.get("assessment_data")?;

        Ok(GrowthRecord {
            id: row.get("id")?,
            resident_id: row.get("resident_id")?,
            record_date: parse_date(&record_date_str),
            age_months: row.get("age_months")?,
            weight_kg: row.get("weight_kg")?,
            height_cm: row.get("height_cm")?,
            muac_cm: row.get("muac_cm")?,
            head_circumference_cm: row.get("head_circumference_cm")?,
            z_score_weight_age: row.get("z_score_weight_age")?,
            notes: row.get("notes")?,
            assessment: parse_json_opt(assessment_str),
        })
    }

    // ============================================
    // Maternal health operations
    // ============================================

    /// Append an ANC/PNC visit record
    pub fn add_maternal_visit(&self, visit: &MaternalVisit) -> bool {
        or_default(
            "add_maternal_visit",
            self.try_add_maternal_visit(visit).map(|_| true),
        )
    }

    fn try_add_maternal_visit(&self, visit: &MaternalVisit) -> Result<()> {
        if !self.try_resident_exists(&visit.resident_id)? {
            return Err(Error::ResidentNotFound(visit.resident_id.clone()));
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO maternal_health (resident_id, pregnancy_id, visit_type, visit_date,
                                         lmp_date, edd_date, gestational_week, fundal_height,
                                         fetal_heart_rate, urine_albumin, hemoglobin, tt_dose,
                                         calcium_iron_status, danger_signs, bp_systolic,
                                         bp_diastolic, delivery_outcome, assessment_data)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17, ?18)
            "#,
            params![
                visit.resident_id,
                visit.pregnancy_id,
                visit.visit_type.as_str(),
                visit.visit_date.to_string(),
                visit.lmp_date.map(|d| d.to_string()),
                visit.edd_date.map(|d| d.to_string()),
                visit.gestational_week,
                visit.fundal_height,
                visit.fetal_heart_rate,
                visit.urine_albumin,
                visit.hemoglobin,
                visit.tt_dose,
                visit.calcium_iron_status,
                visit.danger_signs,
                visit.bp_systolic,
                visit.bp_diastolic,
                visit.delivery_outcome,
                visit.assessment.as_ref().map(|v| v.to_string()),
            ],
        )?;
        Ok(())
    }

    /// Maternal visits for one resident, newest first
    pub fn get_maternal_visits(&self, resident_id: &str) -> Vec<MaternalVisit> {
        or_default(
            "get_maternal_visits",
            self.try_maternal_visits(Some(resident_id)),
        )
    }

    /// All maternal visits, newest first (exports and analytics)
    pub fn all_maternal_visits(&self) -> Vec<MaternalVisit> {
        or_default("all_maternal_visits", self.try_maternal_visits(None))
    }

    fn try_maternal_visits(&self, resident_id: Option<&str>) -> Result<Vec<MaternalVisit>> {
        let conn = self.conn.lock().unwrap();
        let base = "SELECT * FROM maternal_health";
        let order = " ORDER BY visit_date DESC, id DESC";

        let rows = match resident_id {
            Some(id) => {
                let mut stmt =
                    conn.prepare(&format!("{} WHERE resident_id = ?{}", base, order))?;
                let rows = stmt
                    .query_map([id], Self::row_to_maternal)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!("{}{}", base, order))?;
                let rows = stmt
                    .query_map([], Self::row_to_maternal)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };
        Ok(rows)
    }

    /// Mothers flagged high-risk from each one's most recent ANC visit.
    ///
    /// A mother is included when that visit shows hypertensive BP, anemia,
    /// or recorded danger signs; the individual flags come back so the due
    /// list can say why.
    pub fn high_risk_mothers(&self) -> Vec<HighRiskMother> {
        or_default("high_risk_mothers", self.try_high_risk_mothers())
    }

    fn try_high_risk_mothers(&self) -> Result<Vec<HighRiskMother>> {
        let conn = self.conn.lock().unwrap();

        // Latest ANC row per resident, with the resident's name
        let mut stmt = conn.prepare(
            r#"
            SELECT m.resident_id, r.name, m.visit_date, m.bp_systolic, m.bp_diastolic,
                   m.hemoglobin, m.danger_signs
            FROM maternal_health m
            JOIN residents r ON r.unique_id = m.resident_id
            WHERE m.visit_type = 'ANC'
              AND m.id = (
                  SELECT m2.id FROM maternal_health m2
                  WHERE m2.resident_id = m.resident_id AND m2.visit_type = 'ANC'
                  ORDER BY m2.visit_date DESC, m2.id DESC
                  LIMIT 1
              )
            ORDER BY m.visit_date DESC
            "#,
        )?;

        let candidates = stmt
            .query_map([], |row| {
                let visit_date_str: String = row.get(2)?;
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    parse_date(&visit_date_str),
                    row.get::<_, Option<i64>>(3)?,
                    row.get::<_, Option<i64>>(4)?,
                    row.get::<_, Option<f64>>(5)?,
                    row.get::<_, Option<String>>(6)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut mothers = Vec::new();
        for (resident_id, name, visit_date, systolic, diastolic, hemoglobin, danger_signs) in
            candidates
        {
            let high_bp = systolic.is_some_and(|s| s >= clinical::HYPERTENSION_SYSTOLIC)
                || diastolic.is_some_and(|d| d >= clinical::HYPERTENSION_DIASTOLIC);
            let low_hemoglobin = hemoglobin.is_some_and(|h| h < clinical::ANEMIA_HEMOGLOBIN);
            let has_danger_signs = danger_signs
                .as_deref()
                .is_some_and(|s| !s.trim().is_empty());

            if high_bp || low_hemoglobin || has_danger_signs {
                mothers.push(HighRiskMother {
                    resident_id,
                    resident_name: name,
                    visit_date,
                    bp_systolic: systolic,
                    bp_diastolic: diastolic,
                    hemoglobin,
                    danger_signs,
                    high_bp,
                    low_hemoglobin,
                    has_danger_signs,
                });
            }
        }

        Ok(mothers)
    }

    fn row_to_maternal(row: &Row) -> rusqlite::Result<MaternalVisit> {
        let visit_type_str: String = row.get("visit_type")?;
        let visit_date_str: String = row.get("visit_date")?;
        let lmp_str: Option<String> = row.get("lmp_date")?;
        let edd_str: Option<String> = row.get("edd_date")?;
        let assessment_str: Option<String> = row.get("assessment_data")?;

        Ok(MaternalVisit {
            id: row.get("id")?,
            resident_id: row.get("resident_id")?,
            pregnancy_id: row.get("pregnancy_id")?,
            visit_type: visit_type_str.parse().unwrap_or(MaternalVisitType::Anc),
            visit_date: parse_date(&visit_date_str),
            lmp_date: parse_date_opt(lmp_str),
            edd_date: parse_date_opt(edd_str),
            gestational_week: row.get("gestational_week")?,
            fundal_height: row.get("fundal_height")?,
            fetal_heart_rate: row.get("fetal_heart_rate")?,
            urine_albumin: row.get("urine_albumin")?,
            hemoglobin: row.get("hemoglobin")?,
            tt_dose: row.get("tt_dose")?,
            calcium_iron_status: row.get("calcium_iron_status")?,
            danger_signs: row.get("danger_signs")?,
            bp_systolic: row.get("bp_systolic")?,
            bp_diastolic: row.get("bp_diastolic")?,
            delivery_outcome: row.get("delivery_outcome")?,
            assessment: parse_json_opt(assessment_str),
        })
    }

    // ============================================
    // NCD follow-up operations
    // ============================================

    /// Append an NCD checkup record
    pub fn add_ncd_checkup(&self, checkup: &NcdCheckup) -> bool {
        or_default(
            "add_ncd_checkup",
            self.try_add_ncd_checkup(checkup).map(|_| true),
        )
    }

    fn try_add_ncd_checkup(&self, checkup: &NcdCheckup) -> Result<()> {
        if !self.try_resident_exists(&checkup.resident_id)? {
            return Err(Error::ResidentNotFound(checkup.resident_id.clone()));
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO ncd_followup (resident_id, checkup_date, condition_type, bp_systolic,
                                      bp_diastolic, fasting_blood_sugar, random_blood_sugar,
                                      medication_adherence, symptoms, referral_needed, assessment_data)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)
            "#,
            params![
                checkup.resident_id,
                checkup.checkup_date.to_string(),
                checkup.condition_type,
                checkup.bp_systolic,
                checkup.bp_diastolic,
                checkup.fasting_blood_sugar,
                checkup.random_blood_sugar,
                checkup.medication_adherence,
                checkup.symptoms,
                checkup.referral_needed,
                checkup.assessment.as_ref().map(|v| v.to_string()),
            ],
        )?;
        Ok(())
    }

    /// NCD checkups for one resident, newest first
    pub fn get_ncd_checkups(&self, resident_id: &str) -> Vec<NcdCheckup> {
        or_default("get_ncd_checkups", self.try_ncd_checkups(Some(resident_id)))
    }

    /// All NCD checkups, newest first (exports and analytics)
    pub fn all_ncd_checkups(&self) -> Vec<NcdCheckup> {
        or_default("all_ncd_checkups", self.try_ncd_checkups(None))
    }

    fn try_ncd_checkups(&self, resident_id: Option<&str>) -> Result<Vec<NcdCheckup>> {
        let conn = self.conn.lock().unwrap();
        let base = "SELECT * FROM ncd_followup";
        let order = " ORDER BY checkup_date DESC, id DESC";

        let rows = match resident_id {
            Some(id) => {
                let mut stmt =
                    conn.prepare(&format!("{} WHERE resident_id = ?{}", base, order))?;
                let rows = stmt
                    .query_map([id], Self::row_to_ncd)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
            None => {
                let mut stmt = conn.prepare(&format!("{}{}", base, order))?;
                let rows = stmt
                    .query_map([], Self::row_to_ncd)?
                    .collect::<std::result::Result<Vec<_>, _>>()?;
                rows
            }
        };
        Ok(rows)
    }

    /// NCD patients whose latest checkup is older than `days_threshold`
    /// days, most overdue first. `days_overdue` counts from the checkup.
    pub fn ncd_due_list(&self, days_threshold: i64) -> Vec<NcdDueEntry> {
        or_default("ncd_due_list", self.try_ncd_due_list(days_threshold))
    }

    fn try_ncd_due_list(&self, days_threshold: i64) -> Result<Vec<NcdDueEntry>> {
        let conn = self.conn.lock().unwrap();

        // Latest checkup per resident
        let mut stmt = conn.prepare(
            r#"
            SELECT n.resident_id, r.name, n.condition_type, n.checkup_date
            FROM ncd_followup n
            JOIN residents r ON r.unique_id = n.resident_id
            WHERE n.id = (
                SELECT n2.id FROM ncd_followup n2
                WHERE n2.resident_id = n.resident_id
                ORDER BY n2.checkup_date DESC, n2.id DESC
                LIMIT 1
            )
            "#,
        )?;

        let latest = stmt
            .query_map([], |row| {
                let checkup_date_str: String = row.get(3)?;
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    parse_date(&checkup_date_str),
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let today = Utc::now().date_naive();
        let mut due: Vec<NcdDueEntry> = latest
            .into_iter()
            .filter_map(|(resident_id, name, condition_type, last_checkup)| {
                let days_overdue = today.signed_duration_since(last_checkup).num_days();
                (days_overdue > days_threshold).then_some(NcdDueEntry {
                    resident_id,
                    resident_name: name,
                    condition_type,
                    last_checkup,
                    days_overdue,
                })
            })
            .collect();

        due.sort_by(|a, b| b.days_overdue.cmp(&a.days_overdue));
        Ok(due)
    }

    fn row_to_ncd(row: &Row) -> rusqlite::Result<NcdCheckup> {
        let checkup_date_str: String = row.get("checkup_date")?;
        let assessment_str: Option<String> = row.get("assessment_data")?;

        Ok(NcdCheckup {
            id: row.get("id")?,
            resident_id: row.get("resident_id")?,
            checkup_date: parse_date(&checkup_date_str),
            condition_type: row.get("condition_type")?,
            bp_systolic: row.get("bp_systolic")?,
            bp_diastolic: row.get("bp_diastolic")?,
            fasting_blood_sugar: row.get("fasting_blood_sugar")?,
            random_blood_sugar: row.get("random_blood_sugar")?,
            medication_adherence: row.get("medication_adherence")?,
            symptoms: row.get("symptoms")?,
            referral_needed: row.get("referral_needed")?,
            assessment: parse_json_opt(assessment_str),
        })
    }

    // ============================================
    // Child assessment operations
    // ============================================

    /// Append an under-5 comprehensive assessment
    pub fn add_child_assessment(&self, assessment: &ChildAssessment) -> bool {
        or_default(
            "add_child_assessment",
            self.try_add_child_assessment(assessment).map(|_| true),
        )
    }

    fn try_add_child_assessment(&self, assessment: &ChildAssessment) -> Result<()> {
        if !self.try_resident_exists(&assessment.resident_id)? {
            return Err(Error::ResidentNotFound(assessment.resident_id.clone()));
        }

        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO child_assessment (resident_id, assessment_date, age_months, checklist, notes)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
            params![
                assessment.resident_id,
                assessment.assessment_date.to_string(),
                assessment.age_months,
                assessment.checklist.as_ref().map(|v| v.to_string()),
                assessment.notes,
            ],
        )?;
        Ok(())
    }

    /// Assessments for one child, newest first
    pub fn get_child_assessments(&self, resident_id: &str) -> Vec<ChildAssessment> {
        or_default(
            "get_child_assessments",
            self.try_get_child_assessments(resident_id),
        )
    }

    fn try_get_child_assessments(&self, resident_id: &str) -> Result<Vec<ChildAssessment>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT * FROM child_assessment WHERE resident_id = ? ORDER BY assessment_date DESC, id DESC",
        )?;
        let assessments = stmt
            .query_map([resident_id], |row| {
                let assessment_date_str: String = row.get("assessment_date")?;
                let checklist_str: Option<String> = row.get("checklist")?;
                Ok(ChildAssessment {
                    id: row.get("id")?,
                    resident_id: row.get("resident_id")?,
                    assessment_date: parse_date(&assessment_date_str),
                    age_months: row.get("age_months")?,
                    checklist: parse_json_opt(checklist_str),
                    notes: row.get("notes")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(assessments)
    }

    // ============================================
    // Household proforma operations
    // ============================================

    /// Insert a household proforma; returns the new surrogate id
    pub fn add_household(&self, household: &Household) -> Option<i64> {
        or_default(
            "add_household",
            self.try_add_household(household).map(Some),
        )
    }

    fn try_add_household(&self, household: &Household) -> Result<i64> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            r#"
            INSERT INTO household_proforma (household_no, head_name, village_area, visit_date,
                                            total_members, notes, assessment_data)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
            "#,
            params![
                household.household_no,
                household.head_name,
                household.village_area,
                household.visit_date.to_string(),
                household.total_members,
                household.notes,
                household.assessment.as_ref().map(|v| v.to_string()),
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// All household proformas, newest first
    pub fn get_households(&self) -> Vec<Household> {
        or_default("get_households", self.try_get_households())
    }

    fn try_get_households(&self) -> Result<Vec<Household>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT * FROM household_proforma ORDER BY visit_date DESC, id DESC")?;
        let households = stmt
            .query_map([], |row| {
                let visit_date_str: String = row.get("visit_date")?;
                let assessment_str: Option<String> = row.get("assessment_data")?;
                Ok(Household {
                    id: row.get("id")?,
                    household_no: row.get("household_no")?,
                    head_name: row.get("head_name")?,
                    village_area: row.get("village_area")?,
                    visit_date: parse_date(&visit_date_str),
                    total_members: row.get("total_members")?,
                    notes: row.get("notes")?,
                    assessment: parse_json_opt(assessment_str),
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(households)
    }

    /// Insert member rows for a household in one transaction
    pub fn add_household_members(&self, members: &[HouseholdMember]) -> bool {
        or_default(
            "add_household_members",
            self.try_add_household_members(members).map(|_| true),
        )
    }

    fn try_add_household_members(&self, members: &[HouseholdMember]) -> Result<()> {
        let mut conn = self.conn.lock().unwrap();
        let tx = conn.transaction()?;

        for member in members {
            tx.execute(
                r#"
                INSERT INTO household_members (household_id, sl_no, name, age, gender, relation, remarks)
                VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)
                "#,
                params![
                    member.household_id,
                    member.sl_no,
                    member.name,
                    member.age,
                    member.gender.map(|g| g.as_str()),
                    member.relation,
                    member.remarks,
                ],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    /// Members of a household, in form order
    pub fn get_household_members(&self, household_id: i64) -> Vec<HouseholdMember> {
        or_default(
            "get_household_members",
            self.try_get_household_members(household_id),
        )
    }

    fn try_get_household_members(&self, household_id: i64) -> Result<Vec<HouseholdMember>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn
            .prepare("SELECT * FROM household_members WHERE household_id = ? ORDER BY sl_no ASC")?;
        let members = stmt
            .query_map([household_id], |row| {
                let gender_str: Option<String> = row.get("gender")?;
                Ok(HouseholdMember {
                    id: row.get("id")?,
                    household_id: row.get("household_id")?,
                    sl_no: row.get("sl_no")?,
                    name: row.get("name")?,
                    age: row.get("age")?,
                    gender: gender_str.and_then(|s| s.parse().ok()),
                    relation: row.get("relation")?,
                    remarks: row.get("remarks")?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(members)
    }

    // ============================================
    // Aggregations
    // ============================================

    /// Counts by gender and by the fixed dashboard age brackets
    pub fn demographics_summary(&self) -> DemographicsSummary {
        or_default("demographics_summary", self.try_demographics_summary())
    }

    fn try_demographics_summary(&self) -> Result<DemographicsSummary> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT gender, COUNT(*) AS n
            FROM residents
            WHERE gender IS NOT NULL
            GROUP BY gender
            ORDER BY n DESC, gender ASC
            "#,
        )?;
        let gender_distribution = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let age_groups = conn.query_row(
            r#"
            SELECT
                COALESCE(SUM(CASE WHEN age < 18 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN age >= 18 AND age < 40 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN age >= 40 AND age < 60 THEN 1 ELSE 0 END), 0),
                COALESCE(SUM(CASE WHEN age >= 60 THEN 1 ELSE 0 END), 0)
            FROM residents
            WHERE age IS NOT NULL
            "#,
            [],
            |row| {
                Ok(AgeBrackets {
                    child: row.get(0)?,
                    adult: row.get(1)?,
                    middle_age: row.get(2)?,
                    senior: row.get(3)?,
                })
            },
        )?;

        Ok(DemographicsSummary {
            gender_distribution,
            age_groups,
        })
    }

    /// Registration and visit counts per calendar month, month ascending
    pub fn monthly_trends(&self) -> MonthlyTrends {
        or_default("monthly_trends", self.try_monthly_trends())
    }

    fn try_monthly_trends(&self) -> Result<MonthlyTrends> {
        let conn = self.conn.lock().unwrap();

        let mut stmt = conn.prepare(
            r#"
            SELECT substr(registration_date, 1, 7) AS month, COUNT(*)
            FROM residents
            GROUP BY month
            ORDER BY month ASC
            "#,
        )?;
        let registrations = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        let mut stmt = conn.prepare(
            r#"
            SELECT substr(visit_date, 1, 7) AS month, COUNT(*)
            FROM visits
            GROUP BY month
            ORDER BY month ASC
            "#,
        )?;
        let visits = stmt
            .query_map([], |row| Ok((row.get(0)?, row.get(1)?)))?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(MonthlyTrends {
            registrations,
            visits,
        })
    }

    // ============================================
    // Export tables
    // ============================================

    /// Residents as a columnar table for export consumers
    pub fn residents_table(&self) -> DataTable {
        let mut table = DataTable::new(&[
            "unique_id",
            "name",
            "age",
            "gender",
            "address",
            "phone",
            "village_area",
            "photo_path",
            "registration_date",
            "registered_by",
            "samagra_id",
            "aadhaar_no",
        ]);
        for r in self.get_all_residents() {
            table.push_row(vec![
                r.unique_id,
                r.name,
                cell(&r.age),
                cell(&r.gender),
                cell(&r.address),
                cell(&r.phone),
                cell(&r.village_area),
                cell(&r.photo_path),
                r.registration_date.to_string(),
                r.registered_by,
                cell(&r.samagra_id),
                cell(&r.aadhaar_no),
            ]);
        }
        table
    }

    /// Visits as a columnar table; pass a resident id to restrict the rows
    pub fn visits_table(&self, resident_id: Option<&str>) -> DataTable {
        let visits = match resident_id {
            Some(id) => self.get_resident_visits(id),
            None => self.get_all_visits(),
        };

        let mut table = DataTable::new(&[
            "visit_id",
            "resident_id",
            "visit_date",
            "visit_time",
            "health_worker",
            "bp_systolic",
            "bp_diastolic",
            "temperature",
            "pulse",
            "weight",
            "height",
            "bmi",
            "spo2",
            "complaints",
            "observations",
            "photo_paths",
        ]);
        for v in visits {
            table.push_row(vec![
                cell(&v.visit_id),
                v.resident_id,
                v.visit_date.to_string(),
                v.visit_time,
                v.health_worker,
                cell(&v.bp_systolic),
                cell(&v.bp_diastolic),
                cell(&v.temperature),
                cell(&v.pulse),
                cell(&v.weight),
                cell(&v.height),
                cell(&v.bmi),
                cell(&v.spo2),
                cell(&v.complaints),
                cell(&v.observations),
                v.photo_paths.join(","),
            ]);
        }
        table
    }

    /// All medical history rows as a columnar table
    pub fn medical_history_table(&self) -> DataTable {
        let histories = or_default("medical_history_table", self.try_all_medical_histories());

        let mut table = DataTable::new(&[
            "history_id",
            "resident_id",
            "chronic_conditions",
            "past_diagnoses",
            "current_medications",
            "allergies",
            "family_history",
            "notes",
            "last_updated",
            "updated_by",
        ]);
        for h in histories {
            table.push_row(vec![
                cell(&h.history_id),
                h.resident_id,
                cell(&h.chronic_conditions),
                cell(&h.past_diagnoses),
                cell(&h.current_medications),
                cell(&h.allergies),
                cell(&h.family_history),
                cell(&h.notes),
                h.last_updated.to_rfc3339(),
                h.updated_by,
            ]);
        }
        table
    }

    fn try_all_medical_histories(&self) -> Result<Vec<MedicalHistory>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT * FROM medical_history ORDER BY resident_id ASC")?;
        let histories = stmt
            .query_map([], Self::row_to_history)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(histories)
    }

    /// All growth records as a columnar table
    pub fn growth_table(&self) -> DataTable {
        let mut table = DataTable::new(&[
            "id",
            "resident_id",
            "record_date",
            "age_months",
            "weight_kg",
            "height_cm",
            "muac_cm",
            "head_circumference_cm",
            "z_score_weight_age",
            "notes",
        ]);
        for g in self.all_growth_records() {
            table.push_row(vec![
                cell(&g.id),
                g.resident_id,
                g.record_date.to_string(),
                cell(&g.age_months),
                cell(&g.weight_kg),
                cell(&g.height_cm),
                cell(&g.muac_cm),
                cell(&g.head_circumference_cm),
                cell(&g.z_score_weight_age),
                cell(&g.notes),
            ]);
        }
        table
    }

    /// All maternal visits as a columnar table
    pub fn maternal_table(&self) -> DataTable {
        let mut table = DataTable::new(&[
            "id",
            "resident_id",
            "pregnancy_id",
            "visit_type",
            "visit_date",
            "lmp_date",
            "edd_date",
            "gestational_week",
            "fundal_height",
            "fetal_heart_rate",
            "urine_albumin",
            "hemoglobin",
            "tt_dose",
            "calcium_iron_status",
            "danger_signs",
            "bp_systolic",
            "bp_diastolic",
            "delivery_outcome",
        ]);
        for m in self.all_maternal_visits() {
            table.push_row(vec![
                cell(&m.id),
                m.resident_id,
                cell(&m.pregnancy_id),
                m.visit_type.as_str().to_string(),
                m.visit_date.to_string(),
                cell(&m.lmp_date),
                cell(&m.edd_date),
                cell(&m.gestational_week),
                cell(&m.fundal_height),
                cell(&m.fetal_heart_rate),
                cell(&m.urine_albumin),
                cell(&m.hemoglobin),
                cell(&m.tt_dose),
                cell(&m.calcium_iron_status),
                cell(&m.danger_signs),
                cell(&m.bp_systolic),
                cell(&m.bp_diastolic),
                cell(&m.delivery_outcome),
            ]);
        }
        table
    }

    /// All NCD checkups as a columnar table
    pub fn ncd_table(&self) -> DataTable {
        let mut table = DataTable::new(&[
            "id",
            "resident_id",
            "checkup_date",
            "condition_type",
            "bp_systolic",
            "bp_diastolic",
            "fasting_blood_sugar",
            "random_blood_sugar",
            "medication_adherence",
            "symptoms",
            "referral_needed",
        ]);
        for n in self.all_ncd_checkups() {
            table.push_row(vec![
                cell(&n.id),
                n.resident_id,
                n.checkup_date.to_string(),
                cell(&n.condition_type),
                cell(&n.bp_systolic),
                cell(&n.bp_diastolic),
                cell(&n.fasting_blood_sugar),
                cell(&n.random_blood_sugar),
                cell(&n.medication_adherence),
                cell(&n.symptoms),
                if n.referral_needed { "yes" } else { "no" }.to_string(),
            ]);
        }
        table
    }
}
