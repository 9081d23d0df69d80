mod types;

pub use types::{Config, DatabaseConfig, PaginationConfig, ServerConfig};

use crate::error::{BookgraphError, Result};
use std::fs;

/// Environment variable that overrides `database.url`
pub const DATABASE_URL_ENV: &str = "BOOKGRAPH_DATABASE_URL";

/// Load configuration from a TOML file
pub fn load_config(path: &str) -> Result<Config> {
    let contents = fs::read_to_string(path)
        .map_err(|e| BookgraphError::Config(format!("Failed to read config file '{}': {}", path, e)))?;

    let mut config = parse_config(&contents)?;

    if let Ok(url) = std::env::var(DATABASE_URL_ENV) {
        tracing::info!("Using database URL from {}", DATABASE_URL_ENV);
        config.database.url = url;
        config.validate().map_err(BookgraphError::Config)?;
    }

    Ok(config)
}

/// Parse and validate configuration from a TOML string
pub fn parse_config(contents: &str) -> Result<Config> {
    let config: Config = toml::from_str(contents)?;
    config.validate().map_err(BookgraphError::Config)?;
    Ok(config)
}

/// Save configuration to a TOML file
pub fn save_config(config: &Config, path: &str) -> Result<()> {
    config.validate().map_err(BookgraphError::Config)?;

    let toml_string = toml::to_string_pretty(config)?;
    fs::write(path, toml_string)
        .map_err(|e| BookgraphError::Config(format!("Failed to write config file '{}': {}", path, e)))?;

    Ok(())
}
