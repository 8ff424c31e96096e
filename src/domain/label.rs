// Display label formatting shared by the filter and the presentation adapter
use chrono::{DateTime, Local, Utc};

pub const DEFAULT_TIMESTAMP_FORMAT: &str = "%m/%d/%Y, %I:%M:%S %p";
pub const DEFAULT_CURRENCY_SYMBOL: &str = "$";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LabelTimezone {
    Local,
    Utc,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LabelFormat {
    pub currency_symbol: String,
    pub timestamp_format: String,
    pub timezone: LabelTimezone,
}

impl Default for LabelFormat {
    fn default() -> Self {
        Self::new(
            DEFAULT_CURRENCY_SYMBOL.to_string(),
            DEFAULT_TIMESTAMP_FORMAT.to_string(),
            LabelTimezone::Local,
        )
    }
}

impl LabelFormat {
    pub fn new(currency_symbol: String, timestamp_format: String, timezone: LabelTimezone) -> Self {
        Self {
            currency_symbol,
            timestamp_format,
            timezone,
        }
    }

    /// Render seconds since the epoch as a date/time string. Values chrono
    /// cannot represent fall back to the raw integer.
    pub fn timestamp_label(&self, timestamp: i64) -> String {
        let Some(utc) = DateTime::<Utc>::from_timestamp(timestamp, 0) else {
            return timestamp.to_string();
        };
        match self.timezone {
            LabelTimezone::Utc => utc.format(&self.timestamp_format).to_string(),
            LabelTimezone::Local => utc
                .with_timezone(&Local)
                .format(&self.timestamp_format)
                .to_string(),
        }
    }

    /// Currency prefix plus exactly two fractional digits.
    pub fn price_label(&self, price: f64) -> String {
        format!("{}{:.2}", self.currency_symbol, price)
    }
}
