//! Integration tests for the records store
//!
//! These run against an in-memory database (and a temp file where the
//! on-disk path matters) to verify the full CRUD/search/aggregate contract.

use chrono::{Datelike, Duration, NaiveDate, Utc};
use sehat_core::db::RecordsStore;
use sehat_core::types::*;
use tempfile::TempDir;

fn open_store() -> RecordsStore {
    let store = RecordsStore::open_in_memory().unwrap();
    store.migrate().unwrap();
    store
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn sample_resident(id: &str) -> Resident {
    Resident {
        unique_id: id.to_string(),
        name: "Asha Devi".to_string(),
        age: Some(29),
        gender: Some(Gender::Female),
        address: Some("Ward 3".to_string()),
        phone: Some("9876543210".to_string()),
        village_area: Some("East Hamlet".to_string()),
        photo_path: None,
        registration_date: date(2026, 1, 15),
        registered_by: "chw-01".to_string(),
        samagra_id: Some("100200300".to_string()),
        aadhaar_no: None,
    }
}

fn sample_visit(resident_id: &str, visit_date: NaiveDate) -> Visit {
    Visit {
        visit_id: None,
        resident_id: resident_id.to_string(),
        visit_date,
        visit_time: "10:30".to_string(),
        health_worker: "chw-01".to_string(),
        bp_systolic: Some(120),
        bp_diastolic: Some(80),
        temperature: Some(98.6),
        pulse: Some(72),
        weight: Some(55.0),
        height: Some(160.0),
        bmi: None,
        spo2: Some(98),
        complaints: Some("routine checkup".to_string()),
        observations: None,
        photo_paths: vec![],
    }
}

// ============================================
// Resident CRUD
// ============================================

#[test]
fn test_resident_round_trip() {
    let store = open_store();
    let resident = sample_resident("VH-2026-0001");

    assert!(store.add_resident(&resident));

    let fetched = store.get_resident("VH-2026-0001").unwrap();
    assert_eq!(fetched, resident);
}

#[test]
fn test_duplicate_resident_id_rejected_without_overwrite() {
    let store = open_store();
    let original = sample_resident("VH-2026-0001");
    assert!(store.add_resident(&original));

    let mut imposter = sample_resident("VH-2026-0001");
    imposter.name = "Someone Else".to_string();
    assert!(!store.add_resident(&imposter));

    // Existing row untouched
    let fetched = store.get_resident("VH-2026-0001").unwrap();
    assert_eq!(fetched.name, "Asha Devi");
    assert_eq!(store.resident_count(), 1);
}

#[test]
fn test_resident_requires_name_and_well_formed_id() {
    let store = open_store();

    let mut blank_name = sample_resident("VH-2026-0001");
    blank_name.name = "   ".to_string();
    assert!(!store.add_resident(&blank_name));

    let bad_id = sample_resident("RES-17");
    assert!(!store.add_resident(&bad_id));

    assert_eq!(store.resident_count(), 0);
}

#[test]
fn test_update_resident_amends_fields_not_id() {
    let store = open_store();
    let mut resident = sample_resident("VH-2026-0001");
    assert!(store.add_resident(&resident));

    resident.phone = Some("9999999999".to_string());
    resident.village_area = Some("West Hamlet".to_string());
    assert!(store.update_resident(&resident));

    let fetched = store.get_resident("VH-2026-0001").unwrap();
    assert_eq!(fetched.phone.as_deref(), Some("9999999999"));
    assert_eq!(fetched.village_area.as_deref(), Some("West Hamlet"));
}

#[test]
fn test_update_missing_resident_fails() {
    let store = open_store();
    let resident = sample_resident("VH-2026-0042");
    assert!(!store.update_resident(&resident));
}

#[test]
fn test_get_missing_resident_is_absent() {
    let store = open_store();
    assert!(store.get_resident("VH-2026-0404").is_none());
    assert!(!store.resident_exists("VH-2026-0404"));
}

#[test]
fn test_search_blank_term_returns_nothing() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));

    assert!(store.search_residents("").is_empty());
    assert!(store.search_residents("   ").is_empty());
    assert!(store.search_residents("\t\n").is_empty());
}

#[test]
fn test_search_matches_id_and_name_substring() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));
    let mut other = sample_resident("VH-2026-0002");
    other.name = "Ram Singh".to_string();
    assert!(store.add_resident(&other));

    // By name fragment, case-insensitive through LIKE
    let by_name = store.search_residents("asha");
    assert_eq!(by_name.len(), 1);
    assert_eq!(by_name[0].unique_id, "VH-2026-0001");

    // By id fragment
    let by_id = store.search_residents("2026-0002");
    assert_eq!(by_id.len(), 1);
    assert_eq!(by_id[0].name, "Ram Singh");

    // No match
    assert!(store.search_residents("zzz").is_empty());
}

#[test]
fn test_search_treats_like_wildcards_literally() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));
    let mut other = sample_resident("VH-2026-0002");
    other.name = "Ram 100% Singh".to_string();
    assert!(store.add_resident(&other));

    // A bare wildcard must not dump the register; it only matches the
    // one name carrying a literal %
    let bare = store.search_residents("%");
    assert_eq!(bare.len(), 1);
    assert_eq!(bare[0].unique_id, "VH-2026-0002");
    assert!(store.search_residents("___").is_empty());

    // But a literal % in a stored name is findable
    let matched = store.search_residents("100%");
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].unique_id, "VH-2026-0002");
}

#[test]
fn test_filter_residents_conjunctive() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001"))); // F, 29, East
    let mut b = sample_resident("VH-2026-0002");
    b.name = "Ram Singh".to_string();
    b.gender = Some(Gender::Male);
    b.age = Some(64);
    assert!(store.add_resident(&b));
    let mut c = sample_resident("VH-2026-0003");
    c.name = "Sita Bai".to_string();
    c.age = Some(45);
    c.village_area = Some("West Hamlet".to_string());
    assert!(store.add_resident(&c));

    let women = store.filter_residents(&ResidentFilter {
        gender: Some(Gender::Female),
        ..Default::default()
    });
    assert_eq!(women.len(), 2);

    let older_women_east = store.filter_residents(&ResidentFilter {
        gender: Some(Gender::Female),
        age_min: Some(40),
        village_area: Some("East Hamlet".to_string()),
        ..Default::default()
    });
    assert!(older_women_east.is_empty());

    // Unset criteria are unconstrained
    let everyone = store.filter_residents(&ResidentFilter::default());
    assert_eq!(everyone.len(), 3);
}

#[test]
fn test_next_resident_id_skips_existing() {
    let store = open_store();
    let year = Utc::now().year();

    let first = store.next_resident_id().unwrap();
    assert_eq!(first, format!("VH-{}-0001", year));

    let mut r = sample_resident(&first);
    r.registration_date = Utc::now().date_naive();
    assert!(store.add_resident(&r));

    let second = store.next_resident_id().unwrap();
    assert_eq!(second, format!("VH-{}-0002", year));
    assert!(!store.resident_exists(&second));
}

#[test]
fn test_next_resident_id_restarts_sequence_each_year() {
    let store = open_store();
    let year = Utc::now().year();

    // A register carried over from last year must not advance this
    // year's sequence
    let prior_id = sehat_core::ids::format_resident_id(year - 1, 42);
    let mut prior = sample_resident(&prior_id);
    prior.registration_date = date(year - 1, 6, 1);
    assert!(store.add_resident(&prior));

    let next = store.next_resident_id().unwrap();
    assert_eq!(next, format!("VH-{}-0001", year));
}

// ============================================
// Visits
// ============================================

#[test]
fn test_visits_ordered_most_recent_first() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));

    assert!(store.add_visit(&sample_visit("VH-2026-0001", date(2026, 2, 10))));
    assert!(store.add_visit(&sample_visit("VH-2026-0001", date(2026, 3, 5))));
    // Backdated entry must still sort into place
    assert!(store.add_visit(&sample_visit("VH-2026-0001", date(2026, 1, 20))));

    let visits = store.get_resident_visits("VH-2026-0001");
    let dates: Vec<NaiveDate> = visits.iter().map(|v| v.visit_date).collect();
    assert_eq!(
        dates,
        vec![date(2026, 3, 5), date(2026, 2, 10), date(2026, 1, 20)]
    );
}

#[test]
fn test_visit_bmi_computed_at_write_time() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));

    let mut visit = sample_visit("VH-2026-0001", date(2026, 2, 1));
    visit.weight = Some(70.0);
    visit.height = Some(175.0);
    visit.bmi = Some(99.9); // caller-supplied value must be ignored
    assert!(store.add_visit(&visit));

    let stored = &store.get_resident_visits("VH-2026-0001")[0];
    let bmi = stored.bmi.unwrap();
    assert!((bmi - 22.9).abs() < 0.1);
}

#[test]
fn test_visit_bmi_absent_for_missing_or_zero_measurements() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));

    let mut no_height = sample_visit("VH-2026-0001", date(2026, 2, 1));
    no_height.height = None;
    assert!(store.add_visit(&no_height));

    let mut zero_weight = sample_visit("VH-2026-0001", date(2026, 2, 2));
    zero_weight.weight = Some(0.0);
    assert!(store.add_visit(&zero_weight));

    for visit in store.get_resident_visits("VH-2026-0001") {
        assert_eq!(visit.bmi, None);
    }
}

#[test]
fn test_visit_for_unknown_resident_rejected() {
    let store = open_store();

    let visit = sample_visit("VH-2026-0404", date(2026, 2, 1));
    assert!(!store.add_visit(&visit));
    assert_eq!(store.visit_count(), 0);
}

#[test]
fn test_recent_visits_join_resident_names() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));
    for day in 1..=5 {
        assert!(store.add_visit(&sample_visit("VH-2026-0001", date(2026, 2, day))));
    }

    let recent = store.get_recent_visits(3);
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0].visit.visit_date, date(2026, 2, 5));
    assert_eq!(recent[0].resident_name.as_deref(), Some("Asha Devi"));
}

#[test]
fn test_visits_by_health_worker_grouped() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));

    for day in 1..=3 {
        let mut v = sample_visit("VH-2026-0001", date(2026, 2, day));
        v.health_worker = "chw-02".to_string();
        assert!(store.add_visit(&v));
    }
    assert!(store.add_visit(&sample_visit("VH-2026-0001", date(2026, 2, 4))));

    let by_worker = store.visits_by_health_worker();
    assert_eq!(by_worker[0], ("chw-02".to_string(), 3));
    assert_eq!(by_worker[1], ("chw-01".to_string(), 1));
}

#[test]
fn test_visit_photo_paths_preserve_order() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));

    let mut visit = sample_visit("VH-2026-0001", date(2026, 2, 1));
    visit.photo_paths = vec!["photos/a.jpg".to_string(), "photos/b.jpg".to_string()];
    assert!(store.add_visit(&visit));

    let stored = &store.get_resident_visits("VH-2026-0001")[0];
    assert_eq!(stored.photo_paths, vec!["photos/a.jpg", "photos/b.jpg"]);
}

// ============================================
// Medical history
// ============================================

#[test]
fn test_medical_history_upsert_keeps_one_row() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));

    let mut history = MedicalHistory {
        history_id: None,
        resident_id: "VH-2026-0001".to_string(),
        chronic_conditions: Some("Hypertension".to_string()),
        past_diagnoses: None,
        current_medications: Some("Amlodipine 5mg".to_string()),
        allergies: None,
        family_history: None,
        notes: None,
        last_updated: Utc::now(),
        updated_by: "chw-01".to_string(),
    };
    assert!(store.upsert_medical_history(&history));

    history.chronic_conditions = Some("Hypertension, Diabetes".to_string());
    history.updated_by = "chw-02".to_string();
    assert!(store.upsert_medical_history(&history));

    let fetched = store.get_medical_history("VH-2026-0001").unwrap();
    assert_eq!(
        fetched.chronic_conditions.as_deref(),
        Some("Hypertension, Diabetes")
    );
    assert_eq!(fetched.updated_by, "chw-02");

    // Exactly one row survives the second write
    assert_eq!(store.medical_history_table().rows.len(), 1);
}

#[test]
fn test_medical_history_for_unknown_resident_rejected() {
    let store = open_store();

    let history = MedicalHistory {
        history_id: None,
        resident_id: "VH-2026-0404".to_string(),
        chronic_conditions: None,
        past_diagnoses: None,
        current_medications: None,
        allergies: None,
        family_history: None,
        notes: None,
        last_updated: Utc::now(),
        updated_by: "chw-01".to_string(),
    };
    assert!(!store.upsert_medical_history(&history));
    assert!(store.get_medical_history("VH-2026-0404").is_none());
}

// ============================================
// Follow-up records
// ============================================

#[test]
fn test_growth_records_round_trip_with_attachment() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));

    let record = GrowthRecord {
        id: None,
        resident_id: "VH-2026-0001".to_string(),
        record_date: date(2026, 2, 1),
        age_months: Some(18),
        weight_kg: Some(9.2),
        height_cm: Some(78.0),
        muac_cm: Some(12.8),
        head_circumference_cm: Some(46.5),
        z_score_weight_age: Some(-1.4),
        notes: Some("improving".to_string()),
        assessment: Some(serde_json::json!({"appetite": "good", "edema": false})),
    };
    assert!(store.add_growth_record(&record));

    let fetched = &store.get_growth_records("VH-2026-0001")[0];
    assert_eq!(fetched.z_score_weight_age, Some(-1.4));
    assert_eq!(
        fetched.assessment.as_ref().unwrap()["appetite"],
        serde_json::json!("good")
    );
}

#[test]
fn test_child_assessments_newest_first() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));

    for (month, day) in [(1, 10), (3, 5), (2, 20)] {
        let assessment = ChildAssessment {
            id: None,
            resident_id: "VH-2026-0001".to_string(),
            assessment_date: date(2026, month, day),
            age_months: Some(24),
            checklist: None,
            notes: None,
        };
        assert!(store.add_child_assessment(&assessment));
    }

    let fetched = store.get_child_assessments("VH-2026-0001");
    assert_eq!(fetched[0].assessment_date, date(2026, 3, 5));
    assert_eq!(fetched[2].assessment_date, date(2026, 1, 10));
}

#[test]
fn test_household_with_members() {
    let store = open_store();

    let household = Household {
        id: None,
        household_no: "H-014".to_string(),
        head_name: Some("Mohan Lal".to_string()),
        village_area: Some("East Hamlet".to_string()),
        visit_date: date(2026, 2, 15),
        total_members: Some(2),
        notes: None,
        assessment: None,
    };
    let household_id = store.add_household(&household).unwrap();

    let members = vec![
        HouseholdMember {
            id: None,
            household_id,
            sl_no: 1,
            name: "Mohan Lal".to_string(),
            age: Some(52),
            gender: Some(Gender::Male),
            relation: Some("Head".to_string()),
            remarks: None,
        },
        HouseholdMember {
            id: None,
            household_id,
            sl_no: 2,
            name: "Kamla Bai".to_string(),
            age: Some(47),
            gender: Some(Gender::Female),
            relation: Some("Wife".to_string()),
            remarks: None,
        },
    ];
    assert!(store.add_household_members(&members));

    let fetched = store.get_household_members(household_id);
    assert_eq!(fetched.len(), 2);
    assert_eq!(fetched[0].sl_no, 1);
    assert_eq!(fetched[1].name, "Kamla Bai");

    assert_eq!(store.get_households().len(), 1);
}

// ============================================
// Risk queries
// ============================================

fn anc_visit(resident_id: &str, visit_date: NaiveDate) -> MaternalVisit {
    MaternalVisit {
        id: None,
        resident_id: resident_id.to_string(),
        pregnancy_id: Some(new_pregnancy_id()),
        visit_type: MaternalVisitType::Anc,
        visit_date,
        lmp_date: None,
        edd_date: None,
        gestational_week: Some(24),
        fundal_height: None,
        fetal_heart_rate: Some(140),
        urine_albumin: None,
        hemoglobin: Some(12.5),
        tt_dose: Some(1),
        calcium_iron_status: None,
        danger_signs: None,
        bp_systolic: Some(110),
        bp_diastolic: Some(72),
        delivery_outcome: None,
        assessment: None,
    }
}

#[test]
fn test_high_risk_flags_from_latest_anc_visit() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));

    // Earlier visit was high-risk; the latest is normal, so no flag
    let mut risky = anc_visit("VH-2026-0001", date(2026, 1, 10));
    risky.hemoglobin = Some(9.0);
    assert!(store.add_maternal_visit(&risky));
    assert!(store.add_maternal_visit(&anc_visit("VH-2026-0001", date(2026, 2, 10))));

    assert!(store.high_risk_mothers().is_empty());

    // A new visit with danger signs re-flags her
    let mut danger = anc_visit("VH-2026-0001", date(2026, 3, 10));
    danger.danger_signs = Some("severe headache, blurred vision".to_string());
    assert!(store.add_maternal_visit(&danger));

    let mothers = store.high_risk_mothers();
    assert_eq!(mothers.len(), 1);
    assert!(mothers[0].has_danger_signs);
    assert!(!mothers[0].high_bp);
    assert!(!mothers[0].low_hemoglobin);
}

#[test]
fn test_ncd_due_list_threshold_and_ordering() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));
    let mut b = sample_resident("VH-2026-0002");
    b.name = "Ram Singh".to_string();
    assert!(store.add_resident(&b));
    let mut c = sample_resident("VH-2026-0003");
    c.name = "Sita Bai".to_string();
    assert!(store.add_resident(&c));

    let today = Utc::now().date_naive();
    let checkup = |resident_id: &str, days_ago: i64| NcdCheckup {
        id: None,
        resident_id: resident_id.to_string(),
        checkup_date: today - Duration::days(days_ago),
        condition_type: Some("Hypertension".to_string()),
        bp_systolic: Some(138),
        bp_diastolic: Some(88),
        fasting_blood_sugar: None,
        random_blood_sugar: None,
        medication_adherence: Some("Yes".to_string()),
        symptoms: None,
        referral_needed: false,
        assessment: None,
    };

    assert!(store.add_ncd_checkup(&checkup("VH-2026-0001", 45)));
    assert!(store.add_ncd_checkup(&checkup("VH-2026-0002", 10)));
    assert!(store.add_ncd_checkup(&checkup("VH-2026-0003", 90)));

    let due = store.ncd_due_list(30);
    assert_eq!(due.len(), 2);
    // Most overdue first
    assert_eq!(due[0].resident_id, "VH-2026-0003");
    assert_eq!(due[0].days_overdue, 90);
    assert_eq!(due[1].resident_id, "VH-2026-0001");
    assert_eq!(due[1].days_overdue, 45);
}

#[test]
fn test_ncd_due_list_uses_latest_checkup() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));

    let today = Utc::now().date_naive();
    let mut old = NcdCheckup {
        id: None,
        resident_id: "VH-2026-0001".to_string(),
        checkup_date: today - Duration::days(120),
        condition_type: Some("Diabetes".to_string()),
        bp_systolic: None,
        bp_diastolic: None,
        fasting_blood_sugar: Some(140.0),
        random_blood_sugar: None,
        medication_adherence: None,
        symptoms: None,
        referral_needed: false,
        assessment: None,
    };
    assert!(store.add_ncd_checkup(&old));
    old.checkup_date = today - Duration::days(5);
    assert!(store.add_ncd_checkup(&old));

    // Latest checkup is recent, so not due despite the old row
    assert!(store.ncd_due_list(30).is_empty());
}

// ============================================
// Aggregations and export
// ============================================

#[test]
fn test_demographics_summary_brackets() {
    let store = open_store();
    let ages = [4, 17, 18, 39, 40, 59, 60, 85];
    for (i, age) in ages.iter().enumerate() {
        let mut r = sample_resident(&format!("VH-2026-{:04}", i + 1));
        r.age = Some(*age);
        r.gender = Some(if i % 2 == 0 { Gender::Female } else { Gender::Male });
        assert!(store.add_resident(&r));
    }

    let summary = store.demographics_summary();
    assert_eq!(summary.age_groups.child, 2);
    assert_eq!(summary.age_groups.adult, 2);
    assert_eq!(summary.age_groups.middle_age, 2);
    assert_eq!(summary.age_groups.senior, 2);

    let total: i64 = summary.gender_distribution.iter().map(|(_, n)| n).sum();
    assert_eq!(total, 8);
}

#[test]
fn test_monthly_trends_ascending_months() {
    let store = open_store();
    let mut r = sample_resident("VH-2026-0001");
    r.registration_date = date(2026, 1, 5);
    assert!(store.add_resident(&r));
    let mut r2 = sample_resident("VH-2026-0002");
    r2.name = "Ram Singh".to_string();
    r2.registration_date = date(2026, 3, 5);
    assert!(store.add_resident(&r2));

    assert!(store.add_visit(&sample_visit("VH-2026-0001", date(2026, 2, 1))));
    assert!(store.add_visit(&sample_visit("VH-2026-0001", date(2026, 2, 15))));

    let trends = store.monthly_trends();
    assert_eq!(
        trends.registrations,
        vec![("2026-01".to_string(), 1), ("2026-03".to_string(), 1)]
    );
    assert_eq!(trends.visits, vec![("2026-02".to_string(), 2)]);
}

#[test]
fn test_export_tables_shape() {
    let store = open_store();
    assert!(store.add_resident(&sample_resident("VH-2026-0001")));
    assert!(store.add_visit(&sample_visit("VH-2026-0001", date(2026, 2, 1))));

    let residents = store.residents_table();
    assert_eq!(residents.columns[0], "unique_id");
    assert_eq!(residents.rows.len(), 1);
    assert_eq!(residents.rows[0].len(), residents.columns.len());
    assert_eq!(residents.rows[0][0], "VH-2026-0001");
    // Absent values export as empty cells, not "None"
    let aadhaar_idx = residents
        .columns
        .iter()
        .position(|c| c == "aadhaar_no")
        .unwrap();
    assert_eq!(residents.rows[0][aadhaar_idx], "");

    let visits = store.visits_table(None);
    assert_eq!(visits.rows.len(), 1);
    assert_eq!(visits.rows[0].len(), visits.columns.len());

    let filtered = store.visits_table(Some("VH-2026-0404"));
    assert!(filtered.is_empty());
}

// ============================================
// End-to-end scenario
// ============================================

#[test]
fn test_high_risk_mother_end_to_end() {
    let store = open_store();

    let resident = sample_resident("VH-2026-0001");
    assert!(store.add_resident(&resident));

    let mut visit = sample_visit("VH-2026-0001", date(2026, 2, 1));
    visit.bp_systolic = Some(150);
    visit.bp_diastolic = Some(95);
    assert!(store.add_visit(&visit));

    let mut anc = anc_visit("VH-2026-0001", date(2026, 2, 1));
    anc.hemoglobin = Some(9.5);
    anc.bp_systolic = Some(150);
    anc.bp_diastolic = Some(95);
    assert!(store.add_maternal_visit(&anc));

    let mothers = store.high_risk_mothers();
    assert_eq!(mothers.len(), 1);
    let mother = &mothers[0];
    assert_eq!(mother.resident_id, "VH-2026-0001");
    assert_eq!(mother.resident_name, "Asha Devi");
    assert!(mother.high_bp);
    assert!(mother.low_hemoglobin);
}

// ============================================
// On-disk store
// ============================================

#[test]
fn test_open_creates_parent_dirs_and_persists() {
    let tmp = TempDir::new().unwrap();
    let db_path = tmp.path().join("nested/dir/records.db");

    {
        let store = RecordsStore::open(&db_path).unwrap();
        store.migrate().unwrap();
        assert!(store.add_resident(&sample_resident("VH-2026-0001")));
    }

    let reopened = RecordsStore::open(&db_path).unwrap();
    reopened.migrate().unwrap();
    assert_eq!(reopened.resident_count(), 1);
    assert_eq!(
        reopened.get_resident("VH-2026-0001").unwrap().name,
        "Asha Devi"
    );
}
