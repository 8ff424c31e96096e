// HTTP request handlers
use crate::application::fetch_controller::RequestOutcome;
use crate::domain::filter::FilterCriteria;
use crate::infrastructure::http_response::{accepts_brotli, json_response};
use crate::presentation::app_state::AppState;
use crate::presentation::price_adapter::{PriceView, StatusView};
use axum::{
    extract::State,
    http::HeaderMap,
    response::{
        sse::{Event, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use futures::{Stream, StreamExt};
use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::sync::Arc;

/// A price bound as typed by the user; numbers are accepted too.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum BoundInput {
    Number(f64),
    Text(String),
}

impl BoundInput {
    fn into_raw(self) -> String {
        match self {
            BoundInput::Number(n) => n.to_string(),
            BoundInput::Text(s) => s,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct FilterInput {
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub min_price: Option<BoundInput>,
    #[serde(default)]
    pub max_price: Option<BoundInput>,
}

impl From<FilterInput> for FilterCriteria {
    fn from(input: FilterInput) -> Self {
        let min = input.min_price.map(BoundInput::into_raw);
        let max = input.max_price.map(BoundInput::into_raw);
        FilterCriteria::from_inputs(input.text, min.as_deref(), max.as_deref())
    }
}

#[derive(Debug, Serialize)]
pub struct RefreshResponse {
    pub accepted: bool,
    pub status: StatusView,
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

fn current_view(state: &AppState) -> PriceView {
    let snapshot = state.price_service.snapshot();
    PriceView::from_snapshot(&state.title, &snapshot, state.price_service.labels())
}

/// Filtered table rows and chart series
pub async fn get_prices(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    let view = current_view(&state);
    match json_response(&view, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Start a fetch; a no-op while one is in flight
pub async fn refresh_prices(State(state): State<Arc<AppState>>) -> Json<RefreshResponse> {
    let outcome = state.price_service.refresh();
    let fetch_state = state.price_service.fetch_state();
    Json(RefreshResponse {
        accepted: outcome == RequestOutcome::Accepted,
        status: StatusView::from(&fetch_state),
    })
}

pub async fn get_filter(State(state): State<Arc<AppState>>) -> Json<FilterCriteria> {
    Json(state.price_service.criteria())
}

pub async fn set_filter(
    headers: HeaderMap,
    State(state): State<Arc<AppState>>,
    Json(input): Json<FilterInput>,
) -> impl IntoResponse {
    state.price_service.set_criteria(input.into());
    let view = current_view(&state);
    match json_response(&view, accepts_brotli(&headers)).await {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

/// Push a fresh view on every fetch transition or filter change
pub async fn stream_prices(
    State(state): State<Arc<AppState>>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let app = state.clone();
    let events = state.price_service.changes().map(move |snapshot| {
        let view = PriceView::from_snapshot(&app.title, &snapshot, app.price_service.labels());
        let event = Event::default()
            .event(view.status.state)
            .json_data(&view)
            .unwrap_or_else(|e| {
                tracing::error!("Failed to encode price view event: {}", e);
                Event::default().comment("encoding error")
            });
        Ok(event)
    });

    Sse::new(events).keep_alive(KeepAlive::default())
}
