use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse};

use crate::app::errors;
use crate::app::extract::Json;
use crate::app::services::AppServices;

pub async fn health() -> StatusCode {
    StatusCode::OK
}

pub async fn stats(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ledger.stats() {
        Ok(stats) => Json(stats).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
