//! Router

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{axis_readings, diagnose_handler, health_check, price_series, token_info};
use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health_check))
        .route("/api/token/{address}", get(token_info))
        .route("/api/series", get(price_series))
        .route("/api/axes", get(axis_readings))
        .route("/api/diagnose", post(diagnose_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
