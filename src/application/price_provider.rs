// Provider trait for price data access
use async_trait::async_trait;

#[async_trait]
pub trait PriceProvider: Send + Sync {
    /// Fetch the serialized candle payload for the configured asset pair
    async fn get_price_series(&self) -> anyhow::Result<String>;
}
