/// SQLite backend over a `sqlx` connection pool

use super::{check_insert, check_update, Datum, EntityStore, Fields, Predicate, Row, Table};
use crate::error::Result;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use sqlx::{QueryBuilder, Sqlite};
use std::str::FromStr;
use std::time::Duration;

const CREATE_AUTHOR_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS author (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL
)
"#;

const CREATE_BOOK_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS book (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    author_id INT NOT NULL
)
"#;

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open a pool for `url`, creating the database file if needed
    ///
    /// In-memory databases live inside a single connection, so the pool is pinned
    /// to one connection that is never recycled.
    pub async fn connect(url: &str, max_connections: u32) -> Result<Self> {
        let options = SqliteConnectOptions::from_str(url)?.create_if_missing(true);
        let in_memory = url.contains(":memory:");

        let mut pool_options = SqlitePoolOptions::new();
        pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>)
        } else {
            pool_options.max_connections(max_connections)
        };

        let pool = pool_options.connect_with(options).await?;
        tracing::info!("Connected to SQLite database at {}", url);

        Ok(Self { pool })
    }
}

fn select_columns(table: Table) -> &'static str {
    match table {
        Table::Author => "id, name, CAST(NULL AS INTEGER) AS author_id",
        Table::Book => "id, name, author_id",
    }
}

fn push_predicate(builder: &mut QueryBuilder<'_, Sqlite>, predicate: Predicate) {
    match predicate {
        Predicate::All => {}
        Predicate::IdEq(id) => {
            builder.push(" WHERE id = ").push_bind(id);
        }
        Predicate::IdGt(id) => {
            builder.push(" WHERE id > ").push_bind(id);
        }
        Predicate::AuthorIdEq(author_id) => {
            builder.push(" WHERE author_id = ").push_bind(author_id);
        }
    }
}

#[async_trait]
impl EntityStore for SqliteStore {
    async fn init_schema(&self) -> Result<()> {
        sqlx::query(CREATE_AUTHOR_TABLE).execute(&self.pool).await?;
        sqlx::query(CREATE_BOOK_TABLE).execute(&self.pool).await?;
        tracing::debug!("Ensured author and book tables exist");
        Ok(())
    }

    async fn get(&self, table: Table, predicate: Predicate) -> Result<Option<Row>> {
        predicate.check(table)?;

        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM {}",
            select_columns(table),
            table
        ));
        push_predicate(&mut builder, predicate);
        builder.push(" ORDER BY id LIMIT 1");

        tracing::debug!("Executing query: {}", builder.sql());

        let row = builder
            .build_query_as::<Row>()
            .fetch_optional(&self.pool)
            .await?;

        Ok(row)
    }

    async fn list(&self, table: Table, predicate: Predicate, limit: Option<i64>) -> Result<Vec<Row>> {
        predicate.check(table)?;

        let mut builder = QueryBuilder::<Sqlite>::new(format!(
            "SELECT {} FROM {}",
            select_columns(table),
            table
        ));
        push_predicate(&mut builder, predicate);
        builder.push(" ORDER BY id");
        if let Some(limit) = limit {
            builder.push(" LIMIT ").push_bind(limit);
        }

        tracing::debug!("Executing query: {}", builder.sql());

        let rows = builder
            .build_query_as::<Row>()
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    async fn count(&self, table: Table, predicate: Predicate) -> Result<i64> {
        predicate.check(table)?;

        let mut builder = QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM {}", table));
        push_predicate(&mut builder, predicate);

        tracing::debug!("Executing query: {}", builder.sql());

        let count = builder
            .build_query_scalar::<i64>()
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    async fn insert(&self, table: Table, fields: Fields) -> Result<i64> {
        check_insert(table, &fields)?;

        let mut builder = QueryBuilder::<Sqlite>::new(format!("INSERT INTO {} (", table));
        {
            let mut columns = builder.separated(", ");
            for (column, _) in &fields {
                columns.push(column.as_str());
            }
        }
        builder.push(") VALUES (");
        {
            let mut values = builder.separated(", ");
            for (_, datum) in fields {
                match datum {
                    Datum::Integer(value) => {
                        values.push_bind(value);
                    }
                    Datum::Text(value) => {
                        values.push_bind(value);
                    }
                }
            }
        }
        builder.push(")");

        tracing::debug!("Executing query: {}", builder.sql());

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.last_insert_rowid())
    }

    async fn update(&self, table: Table, id: i64, fields: Fields) -> Result<u64> {
        check_update(table, &fields)?;

        let mut builder = QueryBuilder::<Sqlite>::new(format!("UPDATE {} SET ", table));
        {
            let mut assignments = builder.separated(", ");
            for (column, datum) in fields {
                assignments.push(format!("{} = ", column.as_str()));
                match datum {
                    Datum::Integer(value) => {
                        assignments.push_bind_unseparated(value);
                    }
                    Datum::Text(value) => {
                        assignments.push_bind_unseparated(value);
                    }
                }
            }
        }
        push_predicate(&mut builder, Predicate::IdEq(id));

        tracing::debug!("Executing query: {}", builder.sql());

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn delete(&self, table: Table, predicate: Predicate) -> Result<u64> {
        predicate.check(table)?;

        let mut builder = QueryBuilder::<Sqlite>::new(format!("DELETE FROM {}", table));
        push_predicate(&mut builder, predicate);

        tracing::debug!("Executing query: {}", builder.sql());

        let result = builder.build().execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn close(&self) {
        self.pool.close().await;
        tracing::info!("SQLite pool closed");
    }
}
