/// Database connection and table creation
pub mod database;

/// Server settings loaded from config.toml and the environment
pub mod server;

pub use server::{AppConfig, load_app_configuration};
