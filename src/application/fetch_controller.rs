// Fetch controller - Request lifecycle with at most one fetch in flight
use crate::application::price_provider::PriceProvider;
use crate::domain::candle::parse_payload;
use crate::domain::error::PriceError;
use crate::domain::fetch_state::{FetchState, FETCH_ERROR_MESSAGE};
use crate::domain::price::{normalize, PricePoint};
use std::sync::Arc;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestOutcome {
    Accepted,
    /// A fetch was already in flight; nothing happened.
    AlreadyLoading,
}

#[derive(Clone)]
pub struct FetchController {
    provider: Arc<dyn PriceProvider>,
    state: Arc<watch::Sender<FetchState>>,
    /// Last successfully fetched series; only a new success replaces it.
    latest: Arc<watch::Sender<Arc<Vec<PricePoint>>>>,
}

impl FetchController {
    pub fn new(provider: Arc<dyn PriceProvider>) -> Self {
        let (state, _) = watch::channel(FetchState::Idle);
        let (latest, _) = watch::channel(Arc::new(Vec::new()));
        Self {
            provider,
            state: Arc::new(state),
            latest: Arc::new(latest),
        }
    }

    pub fn state(&self) -> FetchState {
        self.state.borrow().clone()
    }

    /// The series from the most recent successful fetch. Survives later
    /// `Loading` and `Error` states; empty until the first success.
    pub fn latest_series(&self) -> Arc<Vec<PricePoint>> {
        self.latest.borrow().clone()
    }

    /// Observe state transitions in the order they happen.
    pub fn subscribe(&self) -> watch::Receiver<FetchState> {
        self.state.subscribe()
    }

    /// Request a fetch and wait for it to reach a terminal state.
    pub async fn request(&self) -> RequestOutcome {
        if !self.try_begin() {
            return RequestOutcome::AlreadyLoading;
        }
        self.run().await;
        RequestOutcome::Accepted
    }

    /// Request a fetch that completes on its own task, so dropping the caller
    /// cannot leave the controller stuck in `Loading`.
    pub fn spawn_request(&self) -> RequestOutcome {
        if !self.try_begin() {
            return RequestOutcome::AlreadyLoading;
        }
        let controller = self.clone();
        tokio::spawn(async move { controller.run().await });
        RequestOutcome::Accepted
    }

    // Check and transition happen under the channel lock.
    fn try_begin(&self) -> bool {
        let started = self.state.send_if_modified(|state| {
            if state.is_loading() {
                false
            } else {
                *state = FetchState::Loading;
                true
            }
        });
        if !started {
            tracing::debug!("fetch already in flight, ignoring request");
        }
        started
    }

    async fn run(&self) {
        let mut in_flight = InFlight::new(&self.state);
        let next = match self.fetch_series().await {
            Ok(series) => {
                tracing::info!(points = series.len(), "price series fetched");
                let series = Arc::new(series);
                self.latest.send_replace(series.clone());
                FetchState::Success(series)
            }
            Err(e) => {
                tracing::error!(error = %e, "error fetching price data");
                FetchState::Error(FETCH_ERROR_MESSAGE.to_string())
            }
        };
        self.state.send_replace(next);
        in_flight.finished = true;
    }

    async fn fetch_series(&self) -> Result<Vec<PricePoint>, PriceError> {
        let payload = self
            .provider
            .get_price_series()
            .await
            .map_err(|e| PriceError::Transport(format!("{:#}", e)))?;
        let raw = parse_payload(&payload)?;
        Ok(normalize(&raw))
    }
}

/// Moves a fetch that never reaches a terminal state (provider panic, dropped
/// future) from `Loading` to `Error`, so the guard cannot stay closed.
struct InFlight<'a> {
    state: &'a watch::Sender<FetchState>,
    finished: bool,
}

impl<'a> InFlight<'a> {
    fn new(state: &'a watch::Sender<FetchState>) -> Self {
        Self {
            state,
            finished: false,
        }
    }
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        tracing::error!("fetch abandoned before completion");
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                *state = FetchState::Error(FETCH_ERROR_MESSAGE.to_string());
                true
            } else {
                false
            }
        });
    }
}
