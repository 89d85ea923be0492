//! Interactive Prediction Routes

use axum::{extract::State, Json};
use chrono::Local;
use customer_record::RawCustomerRecord;
use feature_engine::{transform_record, EngineeredRecord, TransformMode};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Response for a single interactive prediction
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub id: i64,
    /// 1 = accept offer, 0 = reject offer
    pub prediction: u8,
    pub verdict: String,
}

/// Profile summary for comparison against the external dashboard
#[derive(Debug, Serialize)]
pub struct CustomerProfile {
    pub income: f64,
    pub marital_status: String,
    pub education: String,
    pub spending: u32,
    pub children: u32,
    pub tenure: f64,
    pub age_group: String,
    pub recency: u32,
}

/// Response for the profile-prediction variant
#[derive(Debug, Serialize)]
pub struct ProfileResponse {
    pub id: i64,
    pub prediction: u8,
    pub verdict: String,
    pub profile: CustomerProfile,
}

pub(crate) fn verdict(id: i64, prediction: u8) -> String {
    if prediction == 1 {
        format!("Customer {id} is likely to accept the offer")
    } else {
        format!("Customer {id} is likely to reject the offer")
    }
}

fn predict_single(
    state: &AppState,
    record: &RawCustomerRecord,
    mode: TransformMode,
) -> Result<(EngineeredRecord, u8), ApiError> {
    let today = Local::now().date_naive();

    let result = state.validator.validate_submission(record, today);
    if !result.valid {
        return Err(ApiError::Validation(result.errors));
    }

    let engineered = transform_record(record, &mode.policy_at(today))?;
    let labels = state
        .classifier
        .predict(std::slice::from_ref(&engineered))?;
    Ok((engineered, labels[0]))
}

/// Predict the offer response for one submitted record
pub async fn predict(
    State(state): State<Arc<AppState>>,
    Json(record): Json<RawCustomerRecord>,
) -> Result<Json<PredictResponse>, ApiError> {
    let (_, prediction) = predict_single(&state, &record, TransformMode::Live)?;
    info!(id = record.id, prediction, "Single prediction served");

    Ok(Json(PredictResponse {
        id: record.id,
        prediction,
        verdict: verdict(record.id, prediction),
    }))
}

/// Predict and return the customer-profile summary.
///
/// Uses the simulated-live mode so the profile's tenure and age group stay
/// comparable with the static dashboard built on the dataset's collection
/// window.
pub async fn predict_profile(
    State(state): State<Arc<AppState>>,
    Json(record): Json<RawCustomerRecord>,
) -> Result<Json<ProfileResponse>, ApiError> {
    let (engineered, prediction) =
        predict_single(&state, &record, TransformMode::SimulatedLive)?;
    info!(id = record.id, prediction, "Profile prediction served");

    Ok(Json(ProfileResponse {
        id: record.id,
        prediction,
        verdict: verdict(record.id, prediction),
        profile: CustomerProfile {
            income: engineered.income,
            marital_status: record.marital_status.clone(),
            education: record.education.clone(),
            spending: engineered.spending,
            children: engineered.children,
            tenure: engineered.tenure,
            age_group: engineered.age_group.as_str().to_string(),
            recency: engineered.recency,
        },
    }))
}
