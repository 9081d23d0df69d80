use async_graphql::ErrorExtensions;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BookgraphError {
    #[error("Store error: {0}")]
    Store(#[from] sqlx::Error),

    #[error("Malformed cursor: {0}")]
    MalformedCursor(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Row decode error: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Schema generation error: {0}")]
    SchemaGeneration(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl BookgraphError {
    /// Error code reported in the GraphQL `extensions.code` field
    pub fn code(&self) -> &'static str {
        match self {
            BookgraphError::MalformedCursor(_) | BookgraphError::InvalidArgument(_) => {
                "BAD_USER_INPUT"
            }
            _ => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl ErrorExtensions for BookgraphError {
    fn extend(&self) -> async_graphql::Error {
        let code = self.code();
        async_graphql::Error::new(self.to_string()).extend_with(|_, ext| ext.set("code", code))
    }
}

impl From<toml::de::Error> for BookgraphError {
    fn from(err: toml::de::Error) -> Self {
        BookgraphError::Config(format!("TOML parse error: {}", err))
    }
}

impl From<toml::ser::Error> for BookgraphError {
    fn from(err: toml::ser::Error) -> Self {
        BookgraphError::Serialization(format!("TOML serialization error: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, BookgraphError>;
