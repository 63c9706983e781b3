#[tokio::main]
async fn main() {
    bazaar_observability::init();

    let config = bazaar_api::app::AppConfig::from_env();

    let app = bazaar_api::app::build_app(config);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
