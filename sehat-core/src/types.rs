//! Core domain types for sehat
//!
//! These types are the typed face of the column contract stored in SQLite.
//! Callers construct and receive these structs; conversion to and from rows
//! happens only inside the store.
//!
//! ## Terminology
//!
//! | Term | Definition |
//! |------|------------|
//! | **Resident** | A person registered in the village, keyed by a stable `VH-YYYY-NNNN` id |
//! | **Visit** | A single checkup event recording vitals for a resident |
//! | **MedicalHistory** | The one current history row per resident (upsert semantics) |
//! | **Follow-up record** | A periodic domain assessment (growth, maternal, NCD, child) tied to a resident |
//! | **Household** | A household proforma survey; members are rows of their own |
//!
//! Numeric vitals are `Option` throughout: absence means "not measured",
//! never zero.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

// ============================================
// Resident
// ============================================

/// Gender as recorded on the registration form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    Male,
    Female,
    Other,
}

impl Gender {
    /// Returns the identifier used in database storage
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "Male",
            Gender::Female => "Female",
            Gender::Other => "Other",
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Male" | "male" => Ok(Gender::Male),
            "Female" | "female" => Ok(Gender::Female),
            "Other" | "other" => Ok(Gender::Other),
            _ => Err(format!("unknown gender: {}", s)),
        }
    }
}

/// A registered village resident.
///
/// `unique_id` is assigned once at registration and never changes; every
/// other field may be amended later. Residents are never hard-deleted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resident {
    /// Stable external id, format `VH-YYYY-NNNN`
    pub unique_id: String,
    /// Full name (required)
    pub name: String,
    /// Age in years at registration
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub address: Option<String>,
    pub phone: Option<String>,
    /// Hamlet/ward within the village
    pub village_area: Option<String>,
    /// Opaque pointer to the stored photo; resolving it is the caller's concern
    pub photo_path: Option<String>,
    /// Date of registration
    pub registration_date: NaiveDate,
    /// Operator who registered this resident
    pub registered_by: String,
    /// Samagra family id, where issued
    pub samagra_id: Option<String>,
    /// Aadhaar number, where consented
    pub aadhaar_no: Option<String>,
}

/// Conjunctive filter over residents; unset criteria are unconstrained
#[derive(Debug, Clone, Default)]
pub struct ResidentFilter {
    pub gender: Option<Gender>,
    pub age_min: Option<i64>,
    pub age_max: Option<i64>,
    pub village_area: Option<String>,
}

// ============================================
// Visit
// ============================================

/// A single checkup event. Append-only: one row per checkup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Visit {
    /// Auto-assigned by the store; `None` until inserted
    pub visit_id: Option<i64>,
    /// References `Resident::unique_id`
    pub resident_id: String,
    pub visit_date: NaiveDate,
    /// Wall-clock time of the checkup, `HH:MM`
    pub visit_time: String,
    pub health_worker: String,
    pub bp_systolic: Option<i64>,
    pub bp_diastolic: Option<i64>,
    /// Body temperature in degrees Fahrenheit
    pub temperature: Option<f64>,
    pub pulse: Option<i64>,
    /// Weight in kilograms
    pub weight: Option<f64>,
    /// Height in centimeters
    pub height: Option<f64>,
    /// Computed at write time from weight and height; never caller-supplied
    pub bmi: Option<f64>,
    pub spo2: Option<i64>,
    pub complaints: Option<String>,
    pub observations: Option<String>,
    /// Ordered photo references, stored as comma-delimited text
    pub photo_paths: Vec<String>,
}

/// Compute BMI from weight (kg) and height (cm), rounded to one decimal.
///
/// Returns `None` unless both values are present and positive: a missing
/// or zero measurement means "not measured", not a zero BMI.
pub fn compute_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg.filter(|w| *w > 0.0)?;
    let height_m = height_cm.filter(|h| *h > 0.0)? / 100.0;
    Some((weight / (height_m * height_m) * 10.0).round() / 10.0)
}

/// A visit joined with the resident's name, for "recent activity" views
#[derive(Debug, Clone)]
pub struct VisitWithResident {
    pub visit: Visit,
    pub resident_name: Option<String>,
}

// ============================================
// Medical history
// ============================================

/// The single current medical history row for a resident.
///
/// "Add" is really an upsert keyed on `resident_id`; the previous row's
/// content is overwritten (last write wins — there is no audit history).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedicalHistory {
    pub history_id: Option<i64>,
    pub resident_id: String,
    pub chronic_conditions: Option<String>,
    pub past_diagnoses: Option<String>,
    pub current_medications: Option<String>,
    pub allergies: Option<String>,
    pub family_history: Option<String>,
    pub notes: Option<String>,
    pub last_updated: DateTime<Utc>,
    pub updated_by: String,
}

// ============================================
// Follow-up records
// ============================================

/// Growth monitoring measurement for an under-5 child
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthRecord {
    pub id: Option<i64>,
    pub resident_id: String,
    pub record_date: NaiveDate,
    pub age_months: Option<i64>,
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    /// Mid-upper-arm circumference
    pub muac_cm: Option<f64>,
    pub head_circumference_cm: Option<f64>,
    /// WHO weight-for-age z-score
    pub z_score_weight_age: Option<f64>,
    pub notes: Option<String>,
    /// Open-ended checklist attachment; validated only as well-formed JSON
    pub assessment: Option<serde_json::Value>,
}

/// Antenatal vs postnatal maternal visit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaternalVisitType {
    Anc,
    Pnc,
}

impl MaternalVisitType {
    pub fn as_str(&self) -> &'static str {
        match self {
            MaternalVisitType::Anc => "ANC",
            MaternalVisitType::Pnc => "PNC",
        }
    }
}

impl std::str::FromStr for MaternalVisitType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ANC" => Ok(MaternalVisitType::Anc),
            "PNC" => Ok(MaternalVisitType::Pnc),
            _ => Err(format!("unknown maternal visit type: {}", s)),
        }
    }
}

/// Generate a pregnancy id for grouping ANC/PNC visits of one pregnancy
pub fn new_pregnancy_id() -> String {
    let id = uuid::Uuid::new_v4().simple().to_string();
    format!("PRG-{}", id[..8].to_uppercase())
}

/// A maternal health (ANC/PNC) visit record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaternalVisit {
    pub id: Option<i64>,
    pub resident_id: String,
    /// Groups the ANC/PNC visits of one pregnancy
    pub pregnancy_id: Option<String>,
    pub visit_type: MaternalVisitType,
    pub visit_date: NaiveDate,
    /// Last menstrual period (ANC only)
    pub lmp_date: Option<NaiveDate>,
    /// Expected delivery date (ANC only)
    pub edd_date: Option<NaiveDate>,
    pub gestational_week: Option<i64>,
    pub fundal_height: Option<f64>,
    pub fetal_heart_rate: Option<i64>,
    pub urine_albumin: Option<String>,
    /// Hemoglobin in g/dL
    pub hemoglobin: Option<f64>,
    /// Tetanus toxoid dose number
    pub tt_dose: Option<i64>,
    pub calcium_iron_status: Option<String>,
    /// Free-text danger signs; non-empty text marks the visit high-risk
    pub danger_signs: Option<String>,
    pub bp_systolic: Option<i64>,
    pub bp_diastolic: Option<i64>,
    /// PNC only
    pub delivery_outcome: Option<String>,
    pub assessment: Option<serde_json::Value>,
}

/// NCD (hypertension/diabetes) follow-up checkup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NcdCheckup {
    pub id: Option<i64>,
    pub resident_id: String,
    pub checkup_date: NaiveDate,
    /// "Hypertension", "Diabetes", "Both", ...
    pub condition_type: Option<String>,
    pub bp_systolic: Option<i64>,
    pub bp_diastolic: Option<i64>,
    pub fasting_blood_sugar: Option<f64>,
    pub random_blood_sugar: Option<f64>,
    /// "Yes" / "Partial" / "No" as asked on the form
    pub medication_adherence: Option<String>,
    pub symptoms: Option<String>,
    pub referral_needed: bool,
    pub assessment: Option<serde_json::Value>,
}

/// Comprehensive under-5 child assessment; the checklist itself stays an
/// opaque JSON attachment since its key set varies by program revision
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChildAssessment {
    pub id: Option<i64>,
    pub resident_id: String,
    pub assessment_date: NaiveDate,
    pub age_months: Option<i64>,
    pub checklist: Option<serde_json::Value>,
    pub notes: Option<String>,
}

// ============================================
// Household proforma
// ============================================

/// Household survey proforma. Stands alone: not keyed to a resident.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Household {
    pub id: Option<i64>,
    pub household_no: String,
    pub head_name: Option<String>,
    pub village_area: Option<String>,
    pub visit_date: NaiveDate,
    pub total_members: Option<i64>,
    pub notes: Option<String>,
    pub assessment: Option<serde_json::Value>,
}

/// One member row of a household proforma, ordered by `sl_no`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HouseholdMember {
    pub id: Option<i64>,
    pub household_id: i64,
    /// Serial number on the paper form; display order
    pub sl_no: i64,
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<Gender>,
    pub relation: Option<String>,
    pub remarks: Option<String>,
}

// ============================================
// Query results
// ============================================

/// A mother flagged for prioritized follow-up, from her latest ANC visit
#[derive(Debug, Clone)]
pub struct HighRiskMother {
    pub resident_id: String,
    pub resident_name: String,
    pub visit_date: NaiveDate,
    pub bp_systolic: Option<i64>,
    pub bp_diastolic: Option<i64>,
    pub hemoglobin: Option<f64>,
    pub danger_signs: Option<String>,
    /// BP at or above the hypertension thresholds
    pub high_bp: bool,
    /// Hemoglobin below the anemia threshold
    pub low_hemoglobin: bool,
    /// Non-empty danger signs noted by the health worker
    pub has_danger_signs: bool,
}

/// An NCD patient overdue for a checkup
#[derive(Debug, Clone)]
pub struct NcdDueEntry {
    pub resident_id: String,
    pub resident_name: String,
    pub condition_type: Option<String>,
    pub last_checkup: NaiveDate,
    /// Days since the last checkup
    pub days_overdue: i64,
}

/// Counts by the fixed age brackets used on program dashboards
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AgeBrackets {
    /// 0-17
    pub child: i64,
    /// 18-39
    pub adult: i64,
    /// 40-59
    pub middle_age: i64,
    /// 60+
    pub senior: i64,
}

/// Demographic roll-up over all residents
#[derive(Debug, Clone, Default)]
pub struct DemographicsSummary {
    /// (gender, count), count descending
    pub gender_distribution: Vec<(String, i64)>,
    pub age_groups: AgeBrackets,
}

/// Registration and visit counts per calendar month
#[derive(Debug, Clone, Default)]
pub struct MonthlyTrends {
    /// (`YYYY-MM`, count), month ascending
    pub registrations: Vec<(String, i64)>,
    /// (`YYYY-MM`, count), month ascending
    pub visits: Vec<(String, i64)>,
}

// ============================================
// Export
// ============================================

/// Columnar result for export consumers.
///
/// One row per record, cells rendered to strings, column order fixed by
/// the store. File-format serialization (CSV, spreadsheets) is the
/// consumer's concern.
#[derive(Debug, Clone, Default)]
pub struct DataTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataTable {
    pub fn new(columns: &[&str]) -> Self {
        Self {
            columns: columns.iter().map(|c| c.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    pub fn push_row(&mut self, row: Vec<String>) {
        debug_assert_eq!(row.len(), self.columns.len());
        self.rows.push(row);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Render an optional cell for export; absent values become empty cells
pub(crate) fn cell<T: std::fmt::Display>(value: &Option<T>) -> String {
    value.as_ref().map(|v| v.to_string()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bmi_normal() {
        let bmi = compute_bmi(Some(70.0), Some(175.0)).unwrap();
        assert!((bmi - 22.9).abs() < 0.1);
    }

    #[test]
    fn test_bmi_missing_or_zero_measurement() {
        assert_eq!(compute_bmi(None, Some(175.0)), None);
        assert_eq!(compute_bmi(Some(70.0), None), None);
        assert_eq!(compute_bmi(Some(0.0), Some(175.0)), None);
        assert_eq!(compute_bmi(Some(70.0), Some(0.0)), None);
        assert_eq!(compute_bmi(Some(70.0), Some(-175.0)), None);
    }

    #[test]
    fn test_gender_round_trip() {
        for g in [Gender::Male, Gender::Female, Gender::Other] {
            assert_eq!(g.as_str().parse::<Gender>().unwrap(), g);
        }
        assert!("unknown".parse::<Gender>().is_err());
    }

    #[test]
    fn test_maternal_visit_type_round_trip() {
        assert_eq!(
            "ANC".parse::<MaternalVisitType>().unwrap(),
            MaternalVisitType::Anc
        );
        assert_eq!(MaternalVisitType::Pnc.as_str(), "PNC");
    }

    #[test]
    fn test_pregnancy_id_shape() {
        let id = new_pregnancy_id();
        assert!(id.starts_with("PRG-"));
        assert_eq!(id.len(), 12);
    }
}
