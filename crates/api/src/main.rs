#[tokio::main]
async fn main() {
    almox_observability::init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "8080".to_string());

    let app = almox_api::app::build_app().expect("failed to build application");

    let listener = tokio::net::TcpListener::bind(format!("0.0.0.0:{port}"))
        .await
        .expect("failed to bind listen address");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
