pub mod catalog;
pub mod config;
pub mod error;
pub mod model;
pub mod pagination;
pub mod relation;
pub mod schema;
pub mod server;
pub mod store;

// Re-export commonly used types
pub use catalog::{Catalog, DeleteResult};
pub use config::{Config, DatabaseConfig, PaginationConfig, ServerConfig};
pub use error::{BookgraphError, Result};
pub use model::{Author, Book, Entity};
pub use schema::SchemaBuilder;
pub use store::{EntityStore, MemoryStore, SharedStore, SqliteStore};
