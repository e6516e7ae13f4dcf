use std::sync::Arc;

use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get},
    Router,
};
use serde::Deserialize;

use almox_core::{IssuanceId, MaterialId};

use crate::app::errors;
use crate::app::extract::Json;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_issuances))
        .route("/:id", delete(reverse_issuance))
}

// -------------------------
// Query Parameters
// -------------------------

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryQuery {
    pub material_id: Option<String>,
}

/// Issuance history, most recent first, optionally scoped to one material.
pub async fn list_issuances(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<HistoryQuery>,
) -> axum::response::Response {
    let material_id = match query.material_id {
        Some(raw) => match raw.parse::<MaterialId>() {
            Ok(id) => Some(id),
            Err(_) => {
                return errors::json_error(
                    StatusCode::BAD_REQUEST,
                    "invalid_id",
                    "invalid material id",
                )
            }
        },
        None => None,
    };

    match services.issuance_log.history(material_id) {
        Ok(issuances) => Json(issuances).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

/// Reverse an issuance: the quantity is credited back (clamped to the total)
/// and the record is removed from the log.
pub async fn reverse_issuance(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: IssuanceId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid issuance id")
        }
    };

    match services.issuance_log.reverse(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
