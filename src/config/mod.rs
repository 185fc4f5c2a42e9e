/// Database configuration and connection management
pub mod database;

/// Owner identity from environment variables
pub mod identity;

/// Mess settings loading from config.toml
pub mod settings;
