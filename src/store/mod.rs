/// Entity store abstraction
///
/// The catalog talks to persistence only through the `EntityStore` trait, so the
/// SQLite backend and the in-process backend are interchangeable.

mod memory;
mod seed;
mod sqlite;

pub use memory::MemoryStore;
pub use seed::{seed_sample_data, SAMPLE_AUTHORS, SAMPLE_BOOKS};
pub use sqlite::SqliteStore;

use crate::config::DatabaseConfig;
use crate::error::{BookgraphError, Result};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;

/// Store handle shared by every resolver
pub type SharedStore = Arc<dyn EntityStore>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Author,
    Book,
}

impl Table {
    pub fn as_str(&self) -> &'static str {
        match self {
            Table::Author => "author",
            Table::Book => "book",
        }
    }

    /// Whether rows of this table carry the given column
    pub fn has_column(&self, column: Column) -> bool {
        match column {
            Column::Name => true,
            Column::AuthorId => *self == Table::Book,
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Writable, non-key columns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    Name,
    AuthorId,
}

impl Column {
    pub fn as_str(&self) -> &'static str {
        match self {
            Column::Name => "name",
            Column::AuthorId => "author_id",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Datum {
    Integer(i64),
    Text(String),
}

/// Column assignments for insert and update
pub type Fields = Vec<(Column, Datum)>;

/// Row filter understood by every backend
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    All,
    IdEq(i64),
    IdGt(i64),
    AuthorIdEq(i64),
}

impl Predicate {
    pub fn matches(&self, row: &Row) -> bool {
        match *self {
            Predicate::All => true,
            Predicate::IdEq(id) => row.id == id,
            Predicate::IdGt(id) => row.id > id,
            Predicate::AuthorIdEq(author_id) => row.author_id == Some(author_id),
        }
    }

    /// Reject predicates on columns the table does not have
    pub fn check(&self, table: Table) -> Result<()> {
        if matches!(self, Predicate::AuthorIdEq(_)) && !table.has_column(Column::AuthorId) {
            return Err(BookgraphError::InvalidArgument(format!(
                "table '{}' has no author_id column",
                table
            )));
        }
        Ok(())
    }
}

/// Shape shared by both tables; `author_id` is `None` for authors
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct Row {
    pub id: i64,
    pub name: String,
    pub author_id: Option<i64>,
}

/// Check that every assigned column exists on `table` and that types line up
pub fn check_fields(table: Table, fields: &Fields) -> Result<()> {
    for (column, datum) in fields {
        if !table.has_column(*column) {
            return Err(BookgraphError::InvalidArgument(format!(
                "table '{}' has no {} column",
                table,
                column.as_str()
            )));
        }

        let well_typed = matches!(
            (column, datum),
            (Column::Name, Datum::Text(_)) | (Column::AuthorId, Datum::Integer(_))
        );
        if !well_typed {
            return Err(BookgraphError::InvalidArgument(format!(
                "wrong value type for column {}",
                column.as_str()
            )));
        }
    }
    Ok(())
}

/// Validate an insert: `name` is always required and books need an `author_id`
pub fn check_insert(table: Table, fields: &Fields) -> Result<()> {
    check_fields(table, fields)?;

    let assigns = |wanted: Column| fields.iter().any(|(column, _)| *column == wanted);
    for column in [Column::Name, Column::AuthorId] {
        if table.has_column(column) && !assigns(column) {
            return Err(BookgraphError::InvalidArgument(format!(
                "{} is required for table '{}'",
                column.as_str(),
                table
            )));
        }
    }
    Ok(())
}

/// Validate an update: at least one column must be assigned
pub fn check_update(table: Table, fields: &Fields) -> Result<()> {
    if fields.is_empty() {
        return Err(BookgraphError::InvalidArgument(format!(
            "no columns given for table '{}'",
            table
        )));
    }
    check_fields(table, fields)
}

/// Persistence backend for authors and books
///
/// Every method is a single round-trip; nothing here spans two calls, so callers
/// composing several calls get no isolation between them.
#[async_trait]
pub trait EntityStore: Send + Sync {
    /// Create the tables if they do not exist yet
    async fn init_schema(&self) -> Result<()>;

    /// First row matching `predicate`, or `None`
    async fn get(&self, table: Table, predicate: Predicate) -> Result<Option<Row>>;

    /// Rows matching `predicate` in ascending id order, at most `limit` of them
    async fn list(&self, table: Table, predicate: Predicate, limit: Option<i64>) -> Result<Vec<Row>>;

    async fn count(&self, table: Table, predicate: Predicate) -> Result<i64>;

    /// Insert a row and return its generated id
    async fn insert(&self, table: Table, fields: Fields) -> Result<i64>;

    /// Update the row with `id`, returning the number of rows affected
    async fn update(&self, table: Table, id: i64, fields: Fields) -> Result<u64>;

    /// Delete matching rows, returning the number of rows affected
    async fn delete(&self, table: Table, predicate: Predicate) -> Result<u64>;

    /// Release the underlying connections
    async fn close(&self);
}

/// Open the store named by `config.url`
pub async fn connect(config: &DatabaseConfig) -> Result<SharedStore> {
    if config.url == "memory:" {
        tracing::info!("Using in-process memory store");
        return Ok(Arc::new(MemoryStore::new()));
    }

    let store = SqliteStore::connect(&config.url, config.max_connections).await?;
    Ok(Arc::new(store))
}
