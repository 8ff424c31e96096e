// Route table
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    get_filter, get_prices, health_check, refresh_prices, set_filter, stream_prices,
};
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;
use tower_http::trace::TraceLayer;

pub fn build_router(state: Arc<AppState>) -> Router {
    // Compression is applied per response in http_response, not as a layer
    Router::new()
        .route("/healthz", get(health_check))
        .route("/prices", get(get_prices))
        .route("/prices/refresh", post(refresh_prices))
        .route("/filter", get(get_filter).put(set_filter))
        .route("/events", get(stream_prices))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
