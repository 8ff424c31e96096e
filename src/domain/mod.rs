// Domain layer - Price series models and pure pipeline steps
pub mod candle;
pub mod error;
pub mod fetch_state;
pub mod filter;
pub mod label;
pub mod price;
