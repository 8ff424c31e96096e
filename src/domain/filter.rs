// Filter criteria and the combined text + price range predicate
use super::error::PriceError;
use super::label::LabelFormat;
use super::price::PricePoint;
use serde::Serialize;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct FilterCriteria {
    pub text: String,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl FilterCriteria {
    pub fn new(text: impl Into<String>, min_price: Option<f64>, max_price: Option<f64>) -> Self {
        Self {
            text: text.into(),
            min_price,
            max_price,
        }
    }

    /// Build criteria from raw user input. A bound that does not parse is
    /// left unset.
    pub fn from_inputs(text: impl Into<String>, min_raw: Option<&str>, max_raw: Option<&str>) -> Self {
        Self::new(text, bound_or_unset(min_raw), bound_or_unset(max_raw))
    }

    fn in_range(&self, price: f64) -> bool {
        self.min_price.is_none_or(|min| price >= min) && self.max_price.is_none_or(|max| price <= max)
    }
}

/// Parse a price bound typed by the user. Blank input is an unset bound;
/// anything else must be a finite number.
pub fn parse_bound(raw: &str) -> Result<Option<f64>, PriceError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(Some(value)),
        _ => Err(PriceError::InvalidFilterInput(raw.to_string())),
    }
}

fn bound_or_unset(raw: Option<&str>) -> Option<f64> {
    match raw.map(parse_bound) {
        None => None,
        Some(Ok(bound)) => bound,
        Some(Err(e)) => {
            tracing::debug!("ignoring price bound: {}", e);
            None
        }
    }
}

/// Keep the points matching both the text and the range predicate, in order.
pub fn filter(series: &[PricePoint], criteria: &FilterCriteria, labels: &LabelFormat) -> Vec<PricePoint> {
    let needle = criteria.text.to_lowercase();

    series
        .iter()
        .filter(|point| criteria.in_range(point.price))
        .filter(|point| needle.is_empty() || matches_text(point, &needle, labels))
        .copied()
        .collect()
}

fn matches_text(point: &PricePoint, needle: &str, labels: &LabelFormat) -> bool {
    labels.timestamp_label(point.timestamp).to_lowercase().contains(needle)
        || labels.price_label(point.price).to_lowercase().contains(needle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::label::{LabelTimezone, DEFAULT_TIMESTAMP_FORMAT};

    fn labels() -> LabelFormat {
        LabelFormat::new(
            "$".to_string(),
            DEFAULT_TIMESTAMP_FORMAT.to_string(),
            LabelTimezone::Utc,
        )
    }

    fn series() -> Vec<PricePoint> {
        vec![
            PricePoint::new(1, 10.0),
            PricePoint::new(2, 50.0),
            PricePoint::new(3, 90.0),
        ]
    }

    #[test]
    fn test_empty_criteria_returns_input() {
        let series = series();
        let criteria = FilterCriteria::default();
        assert_eq!(filter(&series, &criteria, &labels()), series);
    }

    #[test]
    fn test_range_scenario_b() {
        let criteria = FilterCriteria::new("", Some(20.0), Some(80.0));
        assert_eq!(filter(&series(), &criteria, &labels()), vec![PricePoint::new(2, 50.0)]);
    }

    #[test]
    fn test_range_bounds_are_inclusive() {
        let criteria = FilterCriteria::new("", Some(10.0), Some(50.0));
        let kept = filter(&series(), &criteria, &labels());
        assert_eq!(kept.len(), 2);
    }

    #[test]
    fn test_single_sided_bounds() {
        let min_only = FilterCriteria::new("", Some(50.0), None);
        assert_eq!(filter(&series(), &min_only, &labels()).len(), 2);

        let max_only = FilterCriteria::new("", None, Some(49.99));
        assert_eq!(filter(&series(), &max_only, &labels()), vec![PricePoint::new(1, 10.0)]);
    }

    #[test]
    fn test_narrowing_bounds_never_grows_result() {
        let series: Vec<PricePoint> = (0..100).map(|i| PricePoint::new(i, (i * 7 % 101) as f64)).collect();
        let mut previous = series.len();
        for step in 0..50 {
            let criteria = FilterCriteria::new("", Some(step as f64), Some(100.0 - step as f64));
            let kept = filter(&series, &criteria, &labels()).len();
            assert!(kept <= previous, "step {} grew from {} to {}", step, previous, kept);
            previous = kept;
        }
    }

    #[test]
    fn test_text_matches_price_label() {
        let criteria = FilterCriteria::new("$50.", None, None);
        assert_eq!(filter(&series(), &criteria, &labels()), vec![PricePoint::new(2, 50.0)]);
    }

    #[test]
    fn test_text_matches_timestamp_label_case_insensitive() {
        let series = vec![PricePoint::new(1700000000, 1.0), PricePoint::new(1700050000, 2.0)];
        // 1700000000 renders as 10:13:20 PM, 1700050000 as 12:06:40 PM
        let kept = filter(&series, &FilterCriteria::new("10:13:20 pm", None, None), &labels());
        assert_eq!(kept, vec![PricePoint::new(1700000000, 1.0)]);
    }

    #[test]
    fn test_text_and_range_are_conjunctive() {
        let series = vec![PricePoint::new(1, 15.0), PricePoint::new(2, 150.0)];
        let criteria = FilterCriteria::new("15", Some(100.0), None);
        assert_eq!(filter(&series, &criteria, &labels()), vec![PricePoint::new(2, 150.0)]);
    }

    #[test]
    fn test_text_without_match_returns_empty() {
        let criteria = FilterCriteria::new("zzz", None, None);
        assert!(filter(&series(), &criteria, &labels()).is_empty());
    }

    #[test]
    fn test_parse_bound() {
        assert_eq!(parse_bound("20"), Ok(Some(20.0)));
        assert_eq!(parse_bound(" 12.5 "), Ok(Some(12.5)));
        assert_eq!(parse_bound(""), Ok(None));
        assert_eq!(parse_bound("   "), Ok(None));
        assert!(matches!(parse_bound("abc"), Err(PriceError::InvalidFilterInput(_))));
        assert!(matches!(parse_bound("NaN"), Err(PriceError::InvalidFilterInput(_))));
        assert!(matches!(parse_bound("inf"), Err(PriceError::InvalidFilterInput(_))));
    }

    #[test]
    fn test_invalid_bounds_are_unset_not_zero() {
        let criteria = FilterCriteria::from_inputs("", Some("abc"), Some("12x"));
        assert_eq!(criteria.min_price, None);
        assert_eq!(criteria.max_price, None);
        assert_eq!(filter(&series(), &criteria, &labels()), series());
    }

    #[test]
    fn test_from_inputs_mixed() {
        let criteria = FilterCriteria::from_inputs("pm", Some("20"), Some("oops"));
        assert_eq!(criteria, FilterCriteria::new("pm", Some(20.0), None));
    }
}
