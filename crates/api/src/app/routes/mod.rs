use axum::Router;

pub mod issuances;
pub mod materials;
pub mod system;

/// Router for the collection endpoints.
pub fn router() -> Router {
    Router::new()
        .nest("/materiais", materials::router())
        .nest("/saidas", issuances::router())
}
