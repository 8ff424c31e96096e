// Fetch lifecycle state
use super::price::PricePoint;
use std::sync::Arc;

pub const FETCH_ERROR_MESSAGE: &str = "Failed to fetch price data. Please try again.";

#[derive(Debug, Clone, Default, PartialEq)]
pub enum FetchState {
    #[default]
    Idle,
    Loading,
    Success(Arc<Vec<PricePoint>>),
    Error(String),
}

impl FetchState {
    pub fn is_loading(&self) -> bool {
        matches!(self, FetchState::Loading)
    }

    /// The refresh affordance is disabled only while a fetch is in flight.
    pub fn can_refresh(&self) -> bool {
        !self.is_loading()
    }

    pub fn series(&self) -> Option<&Arc<Vec<PricePoint>>> {
        match self {
            FetchState::Success(series) => Some(series),
            _ => None,
        }
    }

    pub fn error_message(&self) -> Option<&str> {
        match self {
            FetchState::Error(message) => Some(message),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            FetchState::Idle => "idle",
            FetchState::Loading => "loading",
            FetchState::Success(_) => "success",
            FetchState::Error(_) => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_state_is_idle() {
        let state = FetchState::default();
        assert_eq!(state, FetchState::Idle);
        assert!(state.can_refresh());
        assert!(state.series().is_none());
    }

    #[test]
    fn test_loading_disables_refresh() {
        assert!(!FetchState::Loading.can_refresh());
        assert!(FetchState::Error(FETCH_ERROR_MESSAGE.to_string()).can_refresh());
        assert!(FetchState::Success(Arc::new(Vec::new())).can_refresh());
    }

    #[test]
    fn test_accessors() {
        let series = Arc::new(vec![PricePoint::new(1, 2.0)]);
        let success = FetchState::Success(series.clone());
        assert_eq!(success.series(), Some(&series));
        assert_eq!(success.name(), "success");

        let error = FetchState::Error("boom".to_string());
        assert_eq!(error.error_message(), Some("boom"));
        assert!(error.series().is_none());
    }
}
