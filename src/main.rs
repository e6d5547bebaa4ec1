use axum::{
    routing::{get, post},
    Router,
};
use interviewer_backend::{
    config::{get_config, init_config},
    middleware, routes, AppState,
};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let app_state = AppState::new();

    let api = Router::new()
        .route("/start", post(routes::interview::start_interview))
        .route("/evaluate", post(routes::interview::evaluate_answers))
        .route("/final_result", get(routes::interview::final_result))
        .route("/query", post(routes::query::query_docs))
        .route("/send-email", post(routes::email::send_email))
        .route("/test-email", post(routes::email::test_email))
        .layer(axum::middleware::from_fn_with_state(
            middleware::rate_limit::new_rps_state(config.public_rps),
            middleware::rate_limit::rps_middleware,
        ));

    let app = Router::new()
        .route("/health", get(routes::health::health))
        .merge(api)
        .with_state(app_state)
        .layer(middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
