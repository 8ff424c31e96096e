// Application layer - Use cases over the price pipeline
pub mod fetch_controller;
pub mod price_provider;
pub mod price_service;
