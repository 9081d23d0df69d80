//! Resolution across the book -> author foreign key
//!
//! Each call is its own store round-trip. Resolving the relation for a list of
//! parents therefore costs one query per parent; there is no batching layer.

use crate::error::Result;
use crate::model::{Author, Book, Entity};
use crate::store::{EntityStore, Predicate, Table};

/// Owning author of `book`, or `None` when `author_id` dangles
pub async fn resolve_author_of(store: &dyn EntityStore, book: &Book) -> Result<Option<Author>> {
    let row = store
        .get(Table::Author, Predicate::IdEq(book.author_id))
        .await?;

    if row.is_none() {
        tracing::debug!(
            "Book {} references missing author {}",
            book.id,
            book.author_id
        );
    }

    row.map(Author::from_row).transpose()
}

/// Every book whose `author_id` is `author.id`
pub async fn resolve_books_of(store: &dyn EntityStore, author: &Author) -> Result<Vec<Book>> {
    store
        .list(Table::Book, Predicate::AuthorIdEq(author.id), None)
        .await?
        .into_iter()
        .map(Book::from_row)
        .collect()
}
