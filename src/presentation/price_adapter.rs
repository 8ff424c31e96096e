// Shapes filtered price data into the table and chart documents
use crate::application::price_service::PriceSnapshot;
use crate::domain::fetch_state::FetchState;
use crate::domain::filter::FilterCriteria;
use crate::domain::label::LabelFormat;
use crate::domain::price::PricePoint;
use serde::Serialize;

const BUTTON_IDLE: &str = "Fetch Latest Price";
const BUTTON_LOADING: &str = "Fetching...";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    pub timestamp_label: String,
    pub price_label: String,
}

/// Line chart input. `labels[i]` and `series[i]` describe table row `i`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub series: Vec<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusView {
    pub state: &'static str,
    pub can_refresh: bool,
    pub button_label: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<&FetchState> for StatusView {
    fn from(state: &FetchState) -> Self {
        Self {
            state: state.name(),
            can_refresh: state.can_refresh(),
            button_label: if state.is_loading() {
                BUTTON_LOADING
            } else {
                BUTTON_IDLE
            },
            error: state.error_message().map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceView {
    pub title: String,
    pub status: StatusView,
    pub criteria: FilterCriteria,
    pub rows: Vec<PriceRow>,
    pub chart: ChartSeries,
}

impl PriceView {
    pub fn from_snapshot(title: &str, snapshot: &PriceSnapshot, labels: &LabelFormat) -> Self {
        Self {
            title: title.to_string(),
            status: StatusView::from(&snapshot.state),
            criteria: snapshot.criteria.clone(),
            rows: to_rows(&snapshot.filtered, labels),
            chart: to_chart(&snapshot.filtered, labels),
        }
    }
}

pub fn to_rows(points: &[PricePoint], labels: &LabelFormat) -> Vec<PriceRow> {
    points
        .iter()
        .map(|p| PriceRow {
            timestamp_label: labels.timestamp_label(p.timestamp),
            price_label: labels.price_label(p.price),
        })
        .collect()
}

pub fn to_chart(points: &[PricePoint], format: &LabelFormat) -> ChartSeries {
    let (labels, series): (Vec<String>, Vec<f64>) = points
        .iter()
        .map(|p| (format.timestamp_label(p.timestamp), p.price))
        .unzip();
    ChartSeries { labels, series }
}
