use axum::{Router, http::Method, routing::get};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use std::sync::Arc;

use crate::{statistics, transactions};
use engine::Engine;

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
}

/// Build the API router around `engine`.
///
/// Routes are read-only and open to any origin.
pub fn router(engine: Engine) -> Router {
    let state = ServerState {
        engine: Arc::new(engine),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET]);

    Router::new()
        .route("/api/transactions", get(transactions::list))
        .route("/api/transactions/statistics", get(statistics::get_stats))
        .route("/api/transactions/bar-chart", get(statistics::bar_chart))
        .route("/api/transactions/pie-chart", get(statistics::pie_chart))
        .route("/api/transactions/combined-data", get(statistics::combined))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

pub async fn run_with_listener(
    engine: Engine,
    listener: tokio::net::TcpListener,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, router(engine)).await
}
