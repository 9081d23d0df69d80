/// Sample dataset inserted by `bookgraph seed` and by `serve` when `database.seed` is on

use super::{Column, Datum, EntityStore, Predicate, Table};
use crate::error::Result;

/// Authors in insertion order; they receive ids 1, 2, 3 on an empty store
pub const SAMPLE_AUTHORS: &[&str] = &["J. K. Rowling", "J. R. R. Tolkien", "Brent Weeks"];

/// Books as (title, 1-based index into `SAMPLE_AUTHORS`)
pub const SAMPLE_BOOKS: &[(&str, usize)] = &[
    ("Harry Potter and the Chamber of Secrets", 1),
    ("Harry Potter and the Prisoner of Azkaban", 1),
    ("Harry Potter and the Goblet of Fire", 1),
    ("The Fellowship of the Ring", 2),
    ("The Two Towers", 2),
    ("The Return of the King", 2),
    ("The Way of Shadows", 3),
    ("Beyond the Shadows", 3),
];

/// Create the tables and insert the sample dataset if both tables are empty
///
/// Returns `true` when rows were inserted.
pub async fn seed_sample_data(store: &dyn EntityStore) -> Result<bool> {
    store.init_schema().await?;

    let authors = store.count(Table::Author, Predicate::All).await?;
    let books = store.count(Table::Book, Predicate::All).await?;
    if authors + books > 0 {
        tracing::info!(
            "Store already contains {} authors and {} books, skipping seed",
            authors,
            books
        );
        return Ok(false);
    }

    let mut author_ids = Vec::with_capacity(SAMPLE_AUTHORS.len());
    for name in SAMPLE_AUTHORS {
        let id = store
            .insert(Table::Author, vec![(Column::Name, Datum::Text(name.to_string()))])
            .await?;
        author_ids.push(id);
    }

    for (title, author) in SAMPLE_BOOKS {
        store
            .insert(
                Table::Book,
                vec![
                    (Column::Name, Datum::Text(title.to_string())),
                    (Column::AuthorId, Datum::Integer(author_ids[author - 1])),
                ],
            )
            .await?;
    }

    tracing::info!(
        "Seeded {} authors and {} books",
        SAMPLE_AUTHORS.len(),
        SAMPLE_BOOKS.len()
    );

    Ok(true)
}
