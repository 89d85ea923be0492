//! API Error Mapping

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use customer_record::BatchError;
use feature_engine::TransformError;
use inference_engine::InferenceError;
use record_validator::ValidationError;
use serde_json::json;
use thiserror::Error;

/// Errors a request handler can surface
#[derive(Debug, Error)]
pub enum ApiError {
    /// One or more record checks failed
    #[error("record failed validation")]
    Validation(Vec<ValidationError>),

    /// The feature transformation rejected the input
    #[error(transparent)]
    Transform(#[from] TransformError),

    /// The uploaded file failed to parse
    #[error(transparent)]
    Batch(#[from] BatchError),

    /// The classifier failed on well-formed input
    #[error(transparent)]
    Inference(#[from] InferenceError),
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::Validation(vec![err])
    }
}

impl IntoResponse for ApiError {
    /// Maps each failure class to a status code and a JSON body naming the
    /// offense. Data problems are the client's (422); inference problems
    /// are ours (500).
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::Validation(errors) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({
                    "error": "record failed validation",
                    "details": errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
                }),
            ),
            ApiError::Transform(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": e.to_string() }),
            ),
            ApiError::Batch(e) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                json!({ "error": e.to_string() }),
            ),
            ApiError::Inference(e) => {
                tracing::error!("Inference error: {e}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": "prediction failed" }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_problems_map_to_422() {
        let response = ApiError::from(TransformError::EmptyBatch).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = ApiError::Validation(vec![ValidationError::MissingIncome { id: 1 }])
            .into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let response = ApiError::from(BatchError::Empty).into_response();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn test_inference_problems_map_to_500() {
        let response = ApiError::from(InferenceError::EmptyEnsemble).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
