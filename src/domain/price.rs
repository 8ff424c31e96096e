// Price series domain model
use super::candle::{RawCandle, RawSeries};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricePoint {
    /// Seconds since the Unix epoch.
    pub timestamp: i64,
    pub price: f64,
}

impl PricePoint {
    pub fn new(timestamp: i64, price: f64) -> Self {
        Self { timestamp, price }
    }
}

impl From<&RawCandle> for PricePoint {
    fn from(candle: &RawCandle) -> Self {
        Self::new(candle.timestamp, candle.close)
    }
}

/// Project candles onto (timestamp, close), one point per candle, same order.
pub fn normalize(raw: &RawSeries) -> Vec<PricePoint> {
    raw.iter().map(PricePoint::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::candle::parse_payload;

    #[test]
    fn test_normalize_scenario_a() {
        let raw = parse_payload("[[1700000000,100,110,90,105]]").unwrap();
        assert_eq!(normalize(&raw), vec![PricePoint::new(1700000000, 105.0)]);
    }

    #[test]
    fn test_normalize_preserves_length_and_order() {
        let raw: RawSeries = (0..50)
            .map(|i| RawCandle::new(1_000 - i, (i as f64) * 1.5))
            .collect();
        let points = normalize(&raw);

        assert_eq!(points.len(), raw.len());
        for (candle, point) in raw.iter().zip(&points) {
            assert_eq!(point.timestamp, candle.timestamp);
            assert_eq!(point.price, candle.close);
        }
    }

    #[test]
    fn test_normalize_keeps_duplicates() {
        let raw = vec![RawCandle::new(7, 1.0), RawCandle::new(7, 1.0)];
        assert_eq!(normalize(&raw).len(), 2);
    }

    #[test]
    fn test_normalize_empty() {
        assert!(normalize(&Vec::new()).is_empty());
    }
}
