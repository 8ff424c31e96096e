// HTTP candles provider implementation
use crate::application::price_provider::PriceProvider;
use crate::infrastructure::config::ProviderSettings;
use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct HttpPriceProvider {
    client: reqwest::Client,
    url: String,
}

impl HttpPriceProvider {
    pub fn new(settings: &ProviderSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            url: settings.candles_url(),
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl PriceProvider for HttpPriceProvider {
    async fn get_price_series(&self) -> Result<String> {
        tracing::debug!("Requesting candles from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to price provider")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Price provider request failed with status {}: {}", status, body);
        }

        response
            .text()
            .await
            .context("Failed to read price provider response")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_targets_configured_pair() {
        let settings = ProviderSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            pair: "ETH-USD".to_string(),
            granularity_secs: 900,
            ..ProviderSettings::default()
        };
        let provider = HttpPriceProvider::new(&settings).unwrap();
        assert_eq!(provider.url(), "http://127.0.0.1:9/products/ETH-USD/candles?granularity=900");
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_an_error() {
        let settings = ProviderSettings {
            base_url: "http://127.0.0.1:9".to_string(),
            timeout_secs: 2,
            ..ProviderSettings::default()
        };
        let provider = HttpPriceProvider::new(&settings).unwrap();
        assert!(provider.get_price_series().await.is_err());
    }
}
