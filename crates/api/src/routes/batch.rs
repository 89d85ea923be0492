//! Batch Prediction Routes

use axum::{
    extract::{Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use customer_record::{read_batch, write_annotated_csv, AnnotatedRecord};
use feature_engine::{transform_batch, TransformMode};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::info;

use crate::error::ApiError;
use crate::AppState;

/// Query parameters for the batch endpoint
#[derive(Debug, Deserialize)]
pub struct BatchQuery {
    /// `csv` streams the annotated batch back instead of JSON
    pub format: Option<String>,
}

/// JSON response for an uploaded batch
#[derive(Debug, Serialize)]
pub struct BatchResponse {
    pub total: usize,
    pub accepted_count: usize,
    pub accepted_ids: Vec<i64>,
    pub summary: String,
    pub rows: Vec<AnnotatedRecord>,
}

/// Predict offer responses for an uploaded CSV batch.
///
/// Dates are taken at face value against the dataset's collection cutoff,
/// and missing incomes are imputed with the batch mean.
pub async fn predict_batch(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BatchQuery>,
    body: String,
) -> Result<Response, ApiError> {
    let records = read_batch(body.as_bytes())?;
    let policy = TransformMode::HistoricalFixed.policy();

    state
        .validator
        .validate_batch(&records, policy.reference_date)?;

    let engineered = transform_batch(&records, &policy)?;
    let labels = state.classifier.predict(&engineered)?;

    let rows: Vec<AnnotatedRecord> = records
        .into_iter()
        .zip(labels)
        .map(|(record, prediction)| AnnotatedRecord { record, prediction })
        .collect();

    let accepted_ids: Vec<i64> = rows
        .iter()
        .filter(|row| row.prediction == 1)
        .map(|row| row.record.id)
        .collect();

    info!(
        total = rows.len(),
        accepted = accepted_ids.len(),
        "Batch prediction served"
    );

    if params.format.as_deref() == Some("csv") {
        let mut out = Vec::new();
        write_annotated_csv(&mut out, &rows)?;
        return Ok((
            [
                (header::CONTENT_TYPE, "text/csv"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"predictions.csv\"",
                ),
            ],
            out,
        )
            .into_response());
    }

    let summary = format!(
        "There are {} customers who are likely to accept the offer.",
        accepted_ids.len()
    );

    Ok(Json(BatchResponse {
        total: rows.len(),
        accepted_count: accepted_ids.len(),
        accepted_ids,
        summary,
        rows,
    })
    .into_response())
}
