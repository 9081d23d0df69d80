use serde::{Deserialize, Serialize};

/// Top-level configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
}

impl Config {
    /// Validate every section
    pub fn validate(&self) -> Result<(), String> {
        self.server.validate()?;
        self.database.validate()?;
        self.pagination.validate()
    }
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Port to bind the server to
    #[serde(default = "default_port")]
    pub port: u16,

    /// Interface to bind the server to
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_port() -> u16 {
    4000
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
            bind: default_bind(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.bind.trim().is_empty() {
            return Err("Server bind address must not be empty".to_string());
        }
        Ok(())
    }
}

/// Entity store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// Store URL: `sqlite:<path>`, `sqlite::memory:` or `memory:`
    #[serde(default = "default_database_url")]
    pub url: String,

    /// Upper bound on pooled SQLite connections
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Insert the sample dataset on startup when the tables are empty
    #[serde(default)]
    pub seed: bool,
}

fn default_database_url() -> String {
    "sqlite:bookgraph.db".to_string()
}

fn default_max_connections() -> u32 {
    5
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: default_database_url(),
            max_connections: default_max_connections(),
            seed: false,
        }
    }
}

impl DatabaseConfig {
    pub fn validate(&self) -> Result<(), String> {
        if !self.url.starts_with("sqlite:") && self.url != "memory:" {
            return Err(format!(
                "Database URL '{}' must start with 'sqlite:' or be 'memory:'",
                self.url
            ));
        }

        if self.max_connections == 0 {
            return Err("max_connections must be at least 1".to_string());
        }

        Ok(())
    }
}

/// Cursor pagination defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationConfig {
    /// Page size used when `first` is omitted
    #[serde(default = "default_page_size")]
    pub default_page_size: i64,

    /// Larger `first` values are clamped to this
    #[serde(default = "default_max_page_size")]
    pub max_page_size: i64,
}

fn default_page_size() -> i64 {
    10
}

fn default_max_page_size() -> i64 {
    100
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
        }
    }
}

impl PaginationConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.default_page_size < 1 {
            return Err(format!(
                "default_page_size must be positive, got {}",
                self.default_page_size
            ));
        }

        if self.max_page_size < self.default_page_size {
            return Err(format!(
                "max_page_size ({}) must not be smaller than default_page_size ({})",
                self.max_page_size, self.default_page_size
            ));
        }

        Ok(())
    }
}
