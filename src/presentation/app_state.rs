// Application state for HTTP handlers
use crate::application::price_service::PriceService;

#[derive(Clone)]
pub struct AppState {
    pub title: String,
    pub price_service: PriceService,
}
