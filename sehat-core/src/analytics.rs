//! Aggregate program statistics computed over store reads.
//!
//! Everything here derives from the stored records at call time; nothing
//! is cached or persisted. The clinical cutoffs come from [`crate::clinical`].

use crate::clinical;
use crate::db::RecordsStore;
use crate::types::{MaternalVisitType, NcdCheckup};
use chrono::{Duration, Utc};
use std::collections::{BTreeMap, HashSet};

/// Child health statistics for the program dashboard.
#[derive(Debug, Clone, Default)]
pub struct ChildHealthStats {
    /// Residents under 5 years of age
    pub under_five_count: i64,
    /// Children whose latest growth record has a weight-for-age z-score
    /// below the WHO threshold
    pub underweight_count: i64,
    /// Children whose latest growth record has a normal z-score
    pub normal_count: i64,
    /// Children whose latest MUAC reading indicates severe acute malnutrition
    pub severe_muac_count: i64,
}

/// Maternal health statistics for the program dashboard.
#[derive(Debug, Clone, Default)]
pub struct MaternalHealthStats {
    /// Pregnancies whose expected delivery date has not yet passed
    pub active_pregnancies: i64,
    /// Total antenatal visits recorded
    pub anc_visit_count: i64,
    /// Total postnatal visits recorded
    pub pnc_visit_count: i64,
    /// Mothers currently flagged high-risk
    pub high_risk_count: i64,
}

/// NCD follow-up statistics for the program dashboard.
#[derive(Debug, Clone, Default)]
pub struct NcdStats {
    /// Distinct residents with at least one NCD checkup
    pub patient_count: i64,
    /// Checkups with referral recorded
    pub referral_count: i64,
    /// (`YYYY-MM`, count) of checkups with hypertensive systolic BP over
    /// the trailing 180 days, month ascending
    pub uncontrolled_bp_by_month: Vec<(String, i64)>,
}

/// Under-5 counts and nutritional status from each child's latest growth record
pub fn child_health_stats(store: &RecordsStore) -> ChildHealthStats {
    let under_five_count = store
        .get_all_residents()
        .iter()
        .filter(|r| r.age.is_some_and(|a| a < 5))
        .count() as i64;

    // Records come back newest first, so the first row per resident is
    // the latest one.
    let mut seen = HashSet::new();
    let mut underweight_count = 0;
    let mut normal_count = 0;
    let mut severe_muac_count = 0;

    for record in store.all_growth_records() {
        if !seen.insert(record.resident_id.clone()) {
            continue;
        }
        if let Some(z) = record.z_score_weight_age {
            if z < clinical::MALNUTRITION_Z_SCORE {
                underweight_count += 1;
            } else {
                normal_count += 1;
            }
        }
        if record.muac_cm.is_some_and(|m| m < clinical::SEVERE_MUAC_CM) {
            severe_muac_count += 1;
        }
    }

    ChildHealthStats {
        under_five_count,
        underweight_count,
        normal_count,
        severe_muac_count,
    }
}

/// Pregnancy and visit roll-up across all maternal records
pub fn maternal_health_stats(store: &RecordsStore) -> MaternalHealthStats {
    let visits = store.all_maternal_visits();
    let today = Utc::now().date_naive();

    let anc_visit_count = visits
        .iter()
        .filter(|v| v.visit_type == MaternalVisitType::Anc)
        .count() as i64;
    let pnc_visit_count = visits.len() as i64 - anc_visit_count;

    // A pregnancy is active while its expected delivery date lies ahead.
    // Without an EDD, fall back to the LMP plus the standard term.
    let mut seen = HashSet::new();
    let mut active_pregnancies = 0;
    for visit in visits
        .iter()
        .filter(|v| v.visit_type == MaternalVisitType::Anc)
    {
        let key = visit
            .pregnancy_id
            .clone()
            .unwrap_or_else(|| visit.resident_id.clone());
        if !seen.insert(key) {
            continue;
        }

        let edd = visit.edd_date.or_else(|| {
            visit
                .lmp_date
                .map(|lmp| lmp + Duration::days(clinical::PREGNANCY_DURATION_DAYS))
        });
        if edd.is_some_and(|d| d >= today) {
            active_pregnancies += 1;
        }
    }

    MaternalHealthStats {
        active_pregnancies,
        anc_visit_count,
        pnc_visit_count,
        high_risk_count: store.high_risk_mothers().len() as i64,
    }
}

/// Patient counts and the trailing uncontrolled-BP trend
pub fn ncd_stats(store: &RecordsStore) -> NcdStats {
    let checkups = store.all_ncd_checkups();
    let cutoff = Utc::now().date_naive() - Duration::days(180);

    let patient_count = checkups
        .iter()
        .map(|c| c.resident_id.as_str())
        .collect::<HashSet<_>>()
        .len() as i64;

    let referral_count = checkups.iter().filter(|c| c.referral_needed).count() as i64;

    let mut by_month: BTreeMap<String, i64> = BTreeMap::new();
    for checkup in checkups.iter().filter(|c| c.checkup_date >= cutoff) {
        if is_uncontrolled_bp(checkup) {
            let month = checkup.checkup_date.format("%Y-%m").to_string();
            *by_month.entry(month).or_insert(0) += 1;
        }
    }

    NcdStats {
        patient_count,
        referral_count,
        uncontrolled_bp_by_month: by_month.into_iter().collect(),
    }
}

fn is_uncontrolled_bp(checkup: &NcdCheckup) -> bool {
    checkup
        .bp_systolic
        .is_some_and(|s| s >= clinical::HYPERTENSION_SYSTOLIC)
        || checkup
            .bp_diastolic
            .is_some_and(|d| d >= clinical::HYPERTENSION_DIASTOLIC)
}
