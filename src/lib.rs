pub mod config;
pub mod database;
pub mod api;
pub mod zones;

pub use config::Settings;
