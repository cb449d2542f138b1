//! Application configuration

use std::env;

use bond_engine::BondEngineConfig;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Listening address
    pub addr: String,
    /// Serve the seeded demo markets
    pub demo: bool,
    /// Bond engine settings
    pub engine: BondEngineConfig,
}

impl AppConfig {
    /// Create a new configuration from environment variables
    pub fn new() -> Self {
        Self {
            addr: env::var("API_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string()),
            demo: env::var("DEMO")
                .map(|v| v == "true" || v == "1")
                .unwrap_or(false),
            engine: BondEngineConfig::from_env(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new()
    }
}
