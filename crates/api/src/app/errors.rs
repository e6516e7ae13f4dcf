use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use almox_core::DomainError;
use almox_infra::{ServiceError, StoreError};

pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(err) => domain_error_to_response(err),
        ServiceError::Store(StoreError::Concurrency(msg)) => {
            json_error(StatusCode::CONFLICT, "conflict", msg)
        }
        ServiceError::Store(err) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            err.to_string(),
        ),
    }
}

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    let message = err.to_string();
    match err {
        DomainError::Validation(_) => {
            json_error(StatusCode::BAD_REQUEST, "validation_error", message)
        }
        DomainError::InvalidId(_) => json_error(StatusCode::BAD_REQUEST, "invalid_id", message),
        DomainError::NotFound(_) => json_error(StatusCode::NOT_FOUND, "not_found", message),
        // Carries the current availability so clients can adjust the request.
        DomainError::InsufficientStock { available, .. } => (
            StatusCode::BAD_REQUEST,
            axum::Json(json!({
                "error": "insufficient_stock",
                "message": message,
                "available": available,
            })),
        )
            .into_response(),
        DomainError::Conflict(_) => json_error(StatusCode::CONFLICT, "conflict", message),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
