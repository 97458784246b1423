mod settings;

pub use settings::{ApiConfig, DatabaseBackend, DatabaseConfig, ServerConfig, Settings};
