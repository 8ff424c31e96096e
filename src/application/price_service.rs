// Price service - Owns the fetch controller and the user's filter criteria
use crate::application::fetch_controller::{FetchController, RequestOutcome};
use crate::domain::fetch_state::FetchState;
use crate::domain::filter::{filter, FilterCriteria};
use crate::domain::label::LabelFormat;
use crate::domain::price::PricePoint;
use futures::Stream;
use std::sync::Arc;
use tokio::sync::watch;
use tokio_stream::wrappers::WatchStream;
use tokio_stream::StreamExt;

/// Everything a display needs at one instant: the fetch state, the criteria
/// in force, and the points of the last successful series that pass them.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceSnapshot {
    pub state: FetchState,
    pub criteria: FilterCriteria,
    pub filtered: Vec<PricePoint>,
}

#[derive(Clone)]
pub struct PriceService {
    controller: FetchController,
    criteria: Arc<watch::Sender<FilterCriteria>>,
    labels: LabelFormat,
}

impl PriceService {
    pub fn new(controller: FetchController, labels: LabelFormat) -> Self {
        let (criteria, _) = watch::channel(FilterCriteria::default());
        Self {
            controller,
            criteria: Arc::new(criteria),
            labels,
        }
    }

    pub fn labels(&self) -> &LabelFormat {
        &self.labels
    }

    /// Start a fetch unless one is already running.
    pub fn refresh(&self) -> RequestOutcome {
        let outcome = self.controller.spawn_request();
        tracing::debug!(?outcome, "refresh requested");
        outcome
    }

    pub fn fetch_state(&self) -> FetchState {
        self.controller.state()
    }

    pub fn criteria(&self) -> FilterCriteria {
        self.criteria.borrow().clone()
    }

    /// Replace the criteria. The fetched series is left untouched.
    pub fn set_criteria(&self, criteria: FilterCriteria) {
        tracing::debug!(?criteria, "filter criteria updated");
        self.criteria.send_replace(criteria);
    }

    pub fn snapshot(&self) -> PriceSnapshot {
        let state = self.controller.state();
        let criteria = self.criteria();
        let filtered = filter(&self.controller.latest_series(), &criteria, &self.labels);
        PriceSnapshot {
            state,
            criteria,
            filtered,
        }
    }

    /// A fresh snapshot now and after every fetch transition or criteria
    /// change.
    pub fn changes(&self) -> impl Stream<Item = PriceSnapshot> + Send + use<> {
        let service = self.clone();
        let fetch = WatchStream::new(self.controller.subscribe()).map(|_| ());
        let criteria = WatchStream::from_changes(self.criteria.subscribe()).map(|_| ());
        fetch.merge(criteria).map(move |_| service.snapshot())
    }
}
