// Domain layer - Entities and value types
pub mod coordinates;
pub mod weather_entry;
