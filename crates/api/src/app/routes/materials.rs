use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Router,
};

use almox_core::MaterialId;
use almox_stock::{MaterialPatch, NewIssuance, NewMaterial};

use crate::app::extract::Json;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_materials).post(create_material))
        .route("/tipos", get(list_categories))
        .route(
            "/:id",
            get(get_material)
                .patch(patch_material)
                .delete(delete_material),
        )
        .route("/:id/saida", post(issue_stock))
}

pub async fn list_materials(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.ledger.get_all() {
        Ok(materials) => Json(materials).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn create_material(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::CreateMaterialRequest>,
) -> axum::response::Response {
    let input = NewMaterial {
        name: body.name,
        category: body.category,
        total_quantity: body.total_quantity,
        entry_date: body
            .entry_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive()),
    };

    match services.ledger.create(input, body.idempotency_key) {
        Ok(material) => (StatusCode::CREATED, Json(material)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn list_categories(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    Json(services.ledger.categories().to_vec()).into_response()
}

pub async fn get_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: MaterialId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid material id")
        }
    };

    match services.ledger.get(id) {
        Ok(Some(material)) => Json(material).into_response(),
        Ok(None) => errors::json_error(StatusCode::NOT_FOUND, "not_found", "material not found"),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn patch_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::PatchMaterialRequest>,
) -> axum::response::Response {
    let id: MaterialId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid material id")
        }
    };

    let patch = MaterialPatch {
        name: body.name,
        category: body.category,
        total_quantity: body.total_quantity,
        entry_date: body.entry_date,
    };

    match services.ledger.update(id, patch) {
        Ok(material) => Json(material).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_material(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
) -> axum::response::Response {
    let id: MaterialId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid material id")
        }
    };

    match services.ledger.remove(id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn issue_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Path(id): Path<String>,
    Json(body): Json<dto::IssueStockRequest>,
) -> axum::response::Response {
    let id: MaterialId = match id.parse() {
        Ok(v) => v,
        Err(_) => {
            return errors::json_error(StatusCode::BAD_REQUEST, "invalid_id", "invalid material id")
        }
    };

    let input = NewIssuance {
        material_id: id,
        quantity: body.quantity,
        issue_date: body
            .issue_date
            .unwrap_or_else(|| chrono::Utc::now().date_naive()),
        recipient: body.recipient,
        destination: body.destination,
        receipt_number: body.receipt_number,
    };

    match services.issuance_log.issue(input) {
        Ok(issuance) => (StatusCode::CREATED, Json(issuance)).into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
