//! Feature Transformation Pipeline

use crate::engineered::{AgeGroup, EducationGroup, EngineeredRecord, MaritalGroup};
use crate::error::TransformError;
use crate::mode::{IncomePolicy, TransformPolicy};
use chrono::Duration;
use customer_record::RawCustomerRecord;
use tracing::debug;

/// Average days per month, used to express tenure in months
const DAYS_PER_MONTH: f64 = 30.44;

/// Transform a single record under the given policy.
///
/// Only for non-imputing policies; a missing income is an error here since a
/// record cannot be imputed in isolation.
pub fn transform_record(
    record: &RawCustomerRecord,
    policy: &TransformPolicy,
) -> Result<EngineeredRecord, TransformError> {
    transform_one(record, policy, None)
}

/// Transform a whole batch under the given policy.
///
/// With `IncomePolicy::ImputeMean`, missing incomes are replaced by the mean
/// of the batch's observed incomes, which makes the result batch-dependent;
/// every other step is row-local.
pub fn transform_batch(
    records: &[RawCustomerRecord],
    policy: &TransformPolicy,
) -> Result<Vec<EngineeredRecord>, TransformError> {
    if records.is_empty() {
        return Err(TransformError::EmptyBatch);
    }

    let fallback_income = match policy.income {
        IncomePolicy::Reject => None,
        IncomePolicy::ImputeMean => Some(mean_observed_income(records)?),
    };

    debug!(
        rows = records.len(),
        reference = %policy.reference_date,
        "Transforming batch"
    );

    records
        .iter()
        .map(|record| transform_one(record, policy, fallback_income))
        .collect()
}

fn transform_one(
    record: &RawCustomerRecord,
    policy: &TransformPolicy,
    fallback_income: Option<f64>,
) -> Result<EngineeredRecord, TransformError> {
    let income = record
        .income
        .or(fallback_income)
        .ok_or(TransformError::MissingIncome { id: record.id })?;

    let age = policy.reference_year - record.year_of_birth;
    let age_group = AgeGroup::from_age(age)?;

    let enrollment = record.enrollment_date - Duration::days(policy.enrollment_shift_days);
    let tenure_days = policy
        .reference_date
        .signed_duration_since(enrollment)
        .num_days();
    let tenure = round_one_decimal(tenure_days as f64 / DAYS_PER_MONTH);

    Ok(EngineeredRecord {
        income,
        recency: record.recency,
        num_deals_purchases: record.num_deals_purchases,
        num_web_purchases: record.num_web_purchases,
        num_catalog_purchases: record.num_catalog_purchases,
        num_store_purchases: record.num_store_purchases,
        num_web_visits_month: record.num_web_visits_month,
        spending: record.total_spending(),
        children: record.num_kids_home + record.num_teens_home,
        age_group,
        tenure,
        marital_status: recode_marital(&record.marital_status)?,
        education: recode_education(&record.education)?,
        accepted_cmp1: record.accepted_cmp1.as_u8(),
        accepted_cmp2: record.accepted_cmp2.as_u8(),
        accepted_cmp3: record.accepted_cmp3.as_u8(),
        accepted_cmp4: record.accepted_cmp4.as_u8(),
        accepted_cmp5: record.accepted_cmp5.as_u8(),
        complained: record.complained.as_u8(),
    })
}

/// Mean of the batch's observed incomes
fn mean_observed_income(records: &[RawCustomerRecord]) -> Result<f64, TransformError> {
    let observed: Vec<f64> = records.iter().filter_map(|r| r.income).collect();
    if observed.is_empty() {
        return Err(TransformError::NoObservedIncome);
    }
    Ok(observed.iter().sum::<f64>() / observed.len() as f64)
}

/// Standard rounding at one decimal place
fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Reduce the seven raw marital categories to two
fn recode_marital(raw: &str) -> Result<MaritalGroup, TransformError> {
    match raw {
        "Divorced" | "Single" | "Absurd" | "Widow" | "YOLO" => Ok(MaritalGroup::Alone),
        "Married" | "Together" => Ok(MaritalGroup::InCouple),
        other => Err(TransformError::UnknownCategory {
            field: "Marital_Status",
            value: other.to_string(),
        }),
    }
}

/// Reduce the five raw education levels to two
fn recode_education(raw: &str) -> Result<EducationGroup, TransformError> {
    match raw {
        "Basic" | "2n Cycle" => Ok(EducationGroup::Undergraduate),
        "Graduation" | "Master" | "PhD" => Ok(EducationGroup::Postgraduate),
        other => Err(TransformError::UnknownCategory {
            field: "Education",
            value: other.to_string(),
        }),
    }
}
