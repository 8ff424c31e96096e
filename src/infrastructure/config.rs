use crate::domain::label::{
    LabelFormat, LabelTimezone, DEFAULT_CURRENCY_SYMBOL, DEFAULT_TIMESTAMP_FORMAT,
};
use chrono::format::{Item, StrftimeItems};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct OracleConfig {
    #[serde(default)]
    pub provider: ProviderSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub display: DisplaySettings,
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ProviderSettings {
    pub base_url: String,
    pub pair: String,
    pub granularity_secs: u32,
    pub timeout_secs: u64,
    pub user_agent: String,
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: "https://api.exchange.coinbase.com".to_string(),
            pair: "ICP-USD".to_string(),
            granularity_secs: 60,
            timeout_secs: 10,
            user_agent: concat!("price-oracle-dashboard/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

impl ProviderSettings {
    pub fn candles_url(&self) -> String {
        format!(
            "{}/products/{}/candles?granularity={}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.pair),
            self.granularity_secs
        )
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerSettings {
    pub bind: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct DisplaySettings {
    pub currency_symbol: String,
    pub timestamp_format: String,
    /// Render timestamps in UTC instead of the host's local time
    pub utc: bool,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            currency_symbol: DEFAULT_CURRENCY_SYMBOL.to_string(),
            timestamp_format: DEFAULT_TIMESTAMP_FORMAT.to_string(),
            utc: false,
        }
    }
}

impl DisplaySettings {
    /// Rejects timestamp formats chrono cannot render.
    pub fn label_format(&self) -> anyhow::Result<LabelFormat> {
        if StrftimeItems::new(&self.timestamp_format).any(|item| item == Item::Error) {
            anyhow::bail!("Invalid timestamp_format {:?}", self.timestamp_format);
        }
        let timezone = if self.utc {
            LabelTimezone::Utc
        } else {
            LabelTimezone::Local
        };
        Ok(LabelFormat::new(
            self.currency_symbol.clone(),
            self.timestamp_format.clone(),
            timezone,
        ))
    }
}

/// Load `config/oracle.{toml,...}` if present, then `ORACLE__*` overrides
pub fn load_oracle_config() -> anyhow::Result<OracleConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/oracle").required(false))
        .add_source(config::Environment::with_prefix("ORACLE").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}
