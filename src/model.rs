//! Catalog entities and their mapping onto store rows

use crate::error::{BookgraphError, Result};
use crate::store::{Row, Table};
use serde::{Deserialize, Serialize};

/// An entity persisted in one store table and paginated by its id
pub trait Entity: Clone + Send + Sync + 'static {
    /// Table holding rows of this entity
    const TABLE: Table;

    /// GraphQL type name
    const TYPE_NAME: &'static str;

    /// Plural used in query field names (`listBooks`, `books`)
    const PLURAL: &'static str;

    fn id(&self) -> i64;

    fn from_row(row: Row) -> Result<Self>;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub id: i64,
    pub name: String,
    pub author_id: i64,
}

impl Entity for Author {
    const TABLE: Table = Table::Author;
    const TYPE_NAME: &'static str = "Author";
    const PLURAL: &'static str = "Authors";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: Row) -> Result<Self> {
        Ok(Self {
            id: row.id,
            name: row.name,
        })
    }
}

impl Entity for Book {
    const TABLE: Table = Table::Book;
    const TYPE_NAME: &'static str = "Book";
    const PLURAL: &'static str = "Books";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_row(row: Row) -> Result<Self> {
        let author_id = row.author_id.ok_or_else(|| {
            BookgraphError::Decode(format!("book row {} has no author_id", row.id))
        })?;

        Ok(Self {
            id: row.id,
            name: row.name,
            author_id,
        })
    }
}
