//! Clinical thresholds used by the risk queries and analytics.
//!
//! Values follow the national CHW field protocol; the NCD due interval is
//! the only one districts override (see `[clinical]` in the config).

/// Systolic BP at or above this is flagged as hypertensive (mmHg)
pub const HYPERTENSION_SYSTOLIC: i64 = 140;

/// Diastolic BP at or above this is flagged as hypertensive (mmHg)
pub const HYPERTENSION_DIASTOLIC: i64 = 90;

/// Hemoglobin below this is flagged as anemia in pregnancy (g/dL)
pub const ANEMIA_HEMOGLOBIN: f64 = 11.0;

/// WHO weight-for-age z-score below this is classified as underweight
pub const MALNUTRITION_Z_SCORE: f64 = -2.0;

/// MUAC below this indicates severe acute malnutrition (cm)
pub const SEVERE_MUAC_CM: f64 = 11.5;

/// Approximate duration of pregnancy, used to bound "active" pregnancies
pub const PREGNANCY_DURATION_DAYS: i64 = 280;

/// Default days-without-checkup before an NCD patient is due
pub const NCD_DUE_DAYS: i64 = 30;
