//! Record Validator for Range Checking

use crate::error::ValidationError;
use chrono::{Datelike, NaiveDate};
use customer_record::RawCustomerRecord;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Validation configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationConfig {
    /// Plausible customer age range (years)
    pub age_range: (i32, i32),
    /// Discounted purchases valid range
    pub deals_purchases_range: (u32, u32),
    /// Web purchases valid range
    pub web_purchases_range: (u32, u32),
    /// Catalog purchases valid range
    pub catalog_purchases_range: (u32, u32),
    /// Store purchases valid range
    pub store_purchases_range: (u32, u32),
    /// Monthly web visits valid range
    pub web_visits_range: (u32, u32),
    /// Recency valid range (days)
    pub recency_range: (u32, u32),
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            age_range: (18, 120),
            deals_purchases_range: (0, 20),
            web_purchases_range: (0, 35),
            catalog_purchases_range: (0, 35),
            store_purchases_range: (0, 20),
            web_visits_range: (0, 25),
            recency_range: (0, 110),
        }
    }
}

/// Result of validating one record
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether all checks passed
    pub valid: bool,
    /// List of validation errors
    pub errors: Vec<ValidationError>,
    /// Number of fields validated
    pub fields_checked: usize,
}

impl ValidationResult {
    fn new(errors: Vec<ValidationError>, fields_checked: usize) -> Self {
        Self {
            valid: errors.is_empty(),
            errors,
            fields_checked,
        }
    }
}

/// Validator for raw customer records
pub struct RecordValidator {
    config: ValidationConfig,
}

impl RecordValidator {
    /// Create a new validator with given config
    pub fn new(config: ValidationConfig) -> Self {
        Self { config }
    }

    /// Validate a single value against a range
    fn validate_range(
        &self,
        field: &'static str,
        value: f64,
        range: (f64, f64),
    ) -> Result<(), ValidationError> {
        if value < range.0 || value > range.1 {
            Err(ValidationError::OutOfRange {
                field,
                value,
                min: range.0,
                max: range.1,
            })
        } else {
            Ok(())
        }
    }

    /// Validate that the birth year puts the customer's age inside the
    /// plausible window, relative to the reference date
    pub fn validate_birth_year(
        &self,
        year_of_birth: i32,
        reference: NaiveDate,
    ) -> Result<(), ValidationError> {
        let (min_age, max_age) = self.config.age_range;
        self.validate_range(
            "Year_Birth",
            year_of_birth as f64,
            (
                (reference.year() - max_age) as f64,
                (reference.year() - min_age) as f64,
            ),
        )
    }

    /// Validate that the enrollment date is not in the future
    pub fn validate_enrollment_date(
        &self,
        date: NaiveDate,
        reference: NaiveDate,
    ) -> Result<(), ValidationError> {
        if date > reference {
            Err(ValidationError::FutureEnrollment { date, reference })
        } else {
            Ok(())
        }
    }

    /// Run every plausibility check on one record, collecting all failures
    pub fn validate_record(
        &self,
        record: &RawCustomerRecord,
        reference: NaiveDate,
    ) -> ValidationResult {
        let to_f64 = |range: (u32, u32)| (range.0 as f64, range.1 as f64);
        let checks = [
            self.validate_birth_year(record.year_of_birth, reference),
            self.validate_enrollment_date(record.enrollment_date, reference),
            self.validate_range(
                "NumDealsPurchases",
                record.num_deals_purchases as f64,
                to_f64(self.config.deals_purchases_range),
            ),
            self.validate_range(
                "NumWebPurchases",
                record.num_web_purchases as f64,
                to_f64(self.config.web_purchases_range),
            ),
            self.validate_range(
                "NumCatalogPurchases",
                record.num_catalog_purchases as f64,
                to_f64(self.config.catalog_purchases_range),
            ),
            self.validate_range(
                "NumStorePurchases",
                record.num_store_purchases as f64,
                to_f64(self.config.store_purchases_range),
            ),
            self.validate_range(
                "NumWebVisitsMonth",
                record.num_web_visits_month as f64,
                to_f64(self.config.web_visits_range),
            ),
            self.validate_range(
                "Recency",
                record.recency as f64,
                to_f64(self.config.recency_range),
            ),
        ];

        let fields_checked = checks.len();
        let errors = checks.into_iter().filter_map(Result::err).collect();
        ValidationResult::new(errors, fields_checked)
    }

    /// Validate an interactive single submission.
    ///
    /// Runs every record check plus the income-presence rule; a missing
    /// income is rejected here rather than imputed.
    pub fn validate_submission(
        &self,
        record: &RawCustomerRecord,
        reference: NaiveDate,
    ) -> ValidationResult {
        let mut result = self.validate_record(record, reference);
        result.fields_checked += 1;
        if record.income.is_none() {
            result.errors.push(ValidationError::MissingIncome { id: record.id });
            result.valid = false;
        }
        result
    }

    /// Validate an uploaded batch.
    ///
    /// Income may be missing (it is imputed downstream); the first failing
    /// row rejects the whole batch, reporting its index.
    pub fn validate_batch(
        &self,
        records: &[RawCustomerRecord],
        reference: NaiveDate,
    ) -> Result<(), ValidationError> {
        for (row, record) in records.iter().enumerate() {
            let result = self.validate_record(record, reference);
            if let Some(error) = result.errors.into_iter().next() {
                return Err(ValidationError::Row {
                    row,
                    source: Box::new(error),
                });
            }
        }
        debug!(rows = records.len(), "Validated batch");
        Ok(())
    }
}

impl Default for RecordValidator {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
