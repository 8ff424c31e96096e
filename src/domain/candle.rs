// Candle domain model and provider payload decoding
use super::error::PriceError;
use serde_json::Value;

const TIMESTAMP_IDX: usize = 0;
const CLOSE_IDX: usize = 4;
const MIN_ARITY: usize = CLOSE_IDX + 1;

/// One provider candle. Positions other than the timestamp and the close are
/// opaque and are not kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RawCandle {
    pub timestamp: i64,
    pub close: f64,
}

impl RawCandle {
    pub fn new(timestamp: i64, close: f64) -> Self {
        Self { timestamp, close }
    }

    fn from_tuple(idx: usize, tuple: &[Value]) -> Result<Self, PriceError> {
        if tuple.len() < MIN_ARITY {
            return Err(PriceError::MalformedPayload(format!(
                "candle {} has {} fields, expected at least {}",
                idx,
                tuple.len(),
                MIN_ARITY
            )));
        }

        let timestamp = as_timestamp(&tuple[TIMESTAMP_IDX]).ok_or_else(|| {
            PriceError::MalformedPayload(format!(
                "candle {} has a non-integer timestamp: {}",
                idx, tuple[TIMESTAMP_IDX]
            ))
        })?;

        let close = tuple[CLOSE_IDX].as_f64().ok_or_else(|| {
            PriceError::MalformedPayload(format!(
                "candle {} has a non-numeric close: {}",
                idx, tuple[CLOSE_IDX]
            ))
        })?;

        Ok(Self::new(timestamp, close))
    }
}

/// Candles in the order the provider delivered them.
pub type RawSeries = Vec<RawCandle>;

// Largest magnitude an f64 holds with every integer below it exact (2^53).
const MAX_EXACT_FLOAT: f64 = 9_007_199_254_740_992.0;

fn as_timestamp(value: &Value) -> Option<i64> {
    if let Some(ts) = value.as_i64() {
        return Some(ts);
    }
    if !value.is_f64() {
        // u64 above i64::MAX
        return None;
    }
    // Some providers serialize integral seconds as floats (1700000000.0)
    value
        .as_f64()
        .filter(|f| f.fract() == 0.0 && f.abs() <= MAX_EXACT_FLOAT)
        .map(|f| f as i64)
}

/// Decode a serialized candle payload. Any structural problem fails the whole
/// payload; a partial series is never returned.
pub fn parse_payload(payload: &str) -> Result<RawSeries, PriceError> {
    let value: Value = serde_json::from_str(payload)
        .map_err(|e| PriceError::MalformedPayload(e.to_string()))?;

    let rows = value.as_array().ok_or_else(|| {
        PriceError::MalformedPayload(format!("expected an array of candles, got {}", kind(&value)))
    })?;

    rows.iter()
        .enumerate()
        .map(|(idx, row)| match row.as_array() {
            Some(tuple) => RawCandle::from_tuple(idx, tuple),
            None => Err(PriceError::MalformedPayload(format!(
                "candle {} is {}, expected an array",
                idx,
                kind(row)
            ))),
        })
        .collect()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
