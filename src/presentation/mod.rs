// Presentation layer - HTTP surface and display shaping
pub mod app_state;
pub mod handlers;
pub mod price_adapter;
pub mod router;
