// Error kinds raised by the price pipeline
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum PriceError {
    /// The provider call failed before a payload was received.
    #[error("transport error: {0}")]
    Transport(String),

    /// The payload could not be decoded into candles.
    #[error("malformed payload: {0}")]
    MalformedPayload(String),

    /// A price bound typed by the user is not a finite number.
    #[error("invalid filter input: {0:?}")]
    InvalidFilterInput(String),
}
