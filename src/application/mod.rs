// Application layer - Use cases and ports
pub mod entry_repository;
pub mod entry_service;
pub mod errors;
pub mod weather_provider;
