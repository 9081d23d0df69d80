/// Query-language agnostic operations over the author/book catalog
///
/// GraphQL resolvers call into `Catalog`; nothing here knows about GraphQL.

use crate::config::PaginationConfig;
use crate::error::Result;
use crate::model::{Author, Book, Entity};
use crate::pagination::{fetch_page, Connection, PageRequest};
use crate::relation;
use crate::store::{Column, Datum, Fields, Predicate, SharedStore, Table};

/// Result of a delete mutation
///
/// `ok` means the store call completed. It does not mean a row existed: deleting
/// an unknown id is a no-op that still reports `ok: true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResult {
    pub ok: bool,
}

#[derive(Clone)]
pub struct Catalog {
    store: SharedStore,
    pagination: PaginationConfig,
}

impl Catalog {
    pub fn new(store: SharedStore, pagination: PaginationConfig) -> Self {
        Self { store, pagination }
    }

    /// One page of `E` after the `after` cursor
    pub async fn page<E: Entity>(&self, first: Option<i64>, after: Option<String>) -> Result<Connection<E>> {
        let request = PageRequest::new(first, after, &self.pagination)?;
        fetch_page::<E>(self.store.as_ref(), &request).await
    }

    /// Every `E` in ascending id order
    pub async fn all<E: Entity>(&self) -> Result<Vec<E>> {
        self.store
            .list(E::TABLE, Predicate::All, None)
            .await?
            .into_iter()
            .map(E::from_row)
            .collect()
    }

    /// Point lookup; `None` when no row has `id`
    pub async fn get<E: Entity>(&self, id: i64) -> Result<Option<E>> {
        self.store
            .get(E::TABLE, Predicate::IdEq(id))
            .await?
            .map(E::from_row)
            .transpose()
    }

    pub async fn author_of(&self, book: &Book) -> Result<Option<Author>> {
        relation::resolve_author_of(self.store.as_ref(), book).await
    }

    pub async fn books_of(&self, author: &Author) -> Result<Vec<Book>> {
        relation::resolve_books_of(self.store.as_ref(), author).await
    }

    pub async fn add_author(&self, name: String) -> Result<Author> {
        let id = self
            .store
            .insert(Table::Author, author_fields(&name))
            .await?;

        tracing::info!("Added author {} ({})", id, name);
        Ok(Author { id, name })
    }

    /// Insert a book; `author_id` is not checked against existing authors
    pub async fn add_book(&self, name: String, author_id: i64) -> Result<Book> {
        let id = self
            .store
            .insert(Table::Book, book_fields(&name, author_id))
            .await?;

        tracing::info!("Added book {} ({})", id, name);
        Ok(Book { id, name, author_id })
    }

    /// Rename an author; `None` when no author has `id`
    pub async fn update_author(&self, id: i64, name: String) -> Result<Option<Author>> {
        let affected = self
            .store
            .update(Table::Author, id, author_fields(&name))
            .await?;

        Ok((affected > 0).then_some(Author { id, name }))
    }

    /// Overwrite a book; `None` when no book has `id`
    pub async fn update_book(&self, id: i64, name: String, author_id: i64) -> Result<Option<Book>> {
        let affected = self
            .store
            .update(Table::Book, id, book_fields(&name, author_id))
            .await?;

        Ok((affected > 0).then_some(Book { id, name, author_id }))
    }

    pub async fn delete_author(&self, id: i64) -> DeleteResult {
        self.delete(Table::Author, id).await
    }

    /// Books referencing the author are left in place and will resolve no author
    pub async fn delete_book(&self, id: i64) -> DeleteResult {
        self.delete(Table::Book, id).await
    }

    // Store failures are logged and reported as `ok: false` instead of surfacing
    // as errors. Deleting a missing row is not a failure.
    async fn delete(&self, table: Table, id: i64) -> DeleteResult {
        match self.store.delete(table, Predicate::IdEq(id)).await {
            Ok(affected) => {
                tracing::info!("Deleted {} {} ({} row(s) affected)", table, id, affected);
                DeleteResult { ok: true }
            }
            Err(e) => {
                tracing::warn!("Failed to delete {} {}: {}", table, id, e);
                DeleteResult { ok: false }
            }
        }
    }
}

fn author_fields(name: &str) -> Fields {
    vec![(Column::Name, Datum::Text(name.to_string()))]
}

fn book_fields(name: &str, author_id: i64) -> Fields {
    vec![
        (Column::Name, Datum::Text(name.to_string())),
        (Column::AuthorId, Datum::Integer(author_id)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookgraphError;
    use crate::store::{EntityStore, MemoryStore, Row};
    use async_trait::async_trait;
    use std::sync::Arc;

    fn catalog() -> Catalog {
        Catalog::new(Arc::new(MemoryStore::new()), PaginationConfig::default())
    }

    /// Store whose every call fails, for exercising error paths
    struct BrokenStore;

    #[async_trait]
    impl EntityStore for BrokenStore {
        async fn init_schema(&self) -> Result<()> {
            Err(broken())
        }
        async fn get(&self, _: Table, _: Predicate) -> Result<Option<Row>> {
            Err(broken())
        }
        async fn list(&self, _: Table, _: Predicate, _: Option<i64>) -> Result<Vec<Row>> {
            Err(broken())
        }
        async fn count(&self, _: Table, _: Predicate) -> Result<i64> {
            Err(broken())
        }
        async fn insert(&self, _: Table, _: Fields) -> Result<i64> {
            Err(broken())
        }
        async fn update(&self, _: Table, _: i64, _: Fields) -> Result<u64> {
            Err(broken())
        }
        async fn delete(&self, _: Table, _: Predicate) -> Result<u64> {
            Err(broken())
        }
        async fn close(&self) {}
    }

    fn broken() -> BookgraphError {
        BookgraphError::Store(sqlx::Error::PoolClosed)
    }

    #[tokio::test]
    async fn test_add_then_get() {
        let catalog = catalog();
        let author = catalog.add_author("Ursula K. Le Guin".to_string()).await.unwrap();
        let book = catalog
            .add_book("A Wizard of Earthsea".to_string(), author.id)
            .await
            .unwrap();

        assert_eq!(catalog.get::<Author>(author.id).await.unwrap(), Some(author.clone()));
        assert_eq!(catalog.get::<Book>(book.id).await.unwrap(), Some(book.clone()));
        assert_eq!(catalog.author_of(&book).await.unwrap(), Some(author));
    }

    #[tokio::test]
    async fn test_get_missing_is_none() {
        let catalog = catalog();
        assert_eq!(catalog.get::<Book>(12).await.unwrap(), None);
        assert_eq!(catalog.get::<Author>(12).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_existing_and_missing() {
        let catalog = catalog();
        let book = catalog.add_book("Draft".to_string(), 1).await.unwrap();

        let updated = catalog
            .update_book(book.id, "Final".to_string(), 2)
            .await
            .unwrap();
        assert_eq!(
            updated,
            Some(Book { id: book.id, name: "Final".to_string(), author_id: 2 })
        );
        assert_eq!(catalog.get::<Book>(book.id).await.unwrap(), updated);

        assert_eq!(catalog.update_author(55, "Ghost".to_string()).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_delete_missing_id_is_ok() {
        let catalog = catalog();
        assert_eq!(catalog.delete_book(1234).await, DeleteResult { ok: true });
    }

    #[tokio::test]
    async fn test_delete_removes_row() {
        let catalog = catalog();
        let author = catalog.add_author("Temp".to_string()).await.unwrap();

        assert!(catalog.delete_author(author.id).await.ok);
        assert_eq!(catalog.get::<Author>(author.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_failure_on_delete_reports_not_ok() {
        let catalog = Catalog::new(Arc::new(BrokenStore), PaginationConfig::default());
        assert_eq!(catalog.delete_book(1).await, DeleteResult { ok: false });
    }

    #[tokio::test]
    async fn test_store_failure_on_read_propagates() {
        let catalog = Catalog::new(Arc::new(BrokenStore), PaginationConfig::default());
        assert!(matches!(
            catalog.get::<Book>(1).await,
            Err(BookgraphError::Store(_))
        ));
        assert!(matches!(
            catalog.page::<Book>(None, None).await,
            Err(BookgraphError::Store(_))
        ));
    }

    #[tokio::test]
    async fn test_all_books_in_id_order() {
        let catalog = catalog();
        for name in ["C", "A", "B"] {
            catalog.add_book(name.to_string(), 1).await.unwrap();
        }

        let ids: Vec<i64> = catalog.all::<Book>().await.unwrap().iter().map(|b| b.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(catalog.all::<Author>().await.unwrap().is_empty());
    }
}
