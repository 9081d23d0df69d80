/// In-process entity store
///
/// Rows live in ordered maps behind a `tokio::sync::RwLock`, so iteration is in
/// ascending id order just like `ORDER BY id` on the SQLite side. Ids are handed
/// out from 1 upward and never reused, matching `AUTOINCREMENT`.

use super::{check_insert, check_update, Column, Datum, EntityStore, Fields, Predicate, Row, Table};
use crate::error::{BookgraphError, Result};

use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

#[derive(Default)]
struct TableData {
    rows: BTreeMap<i64, Row>,
    last_id: i64,
}

#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<HashMap<Table, TableData>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

fn apply(row: &mut Row, fields: Fields) {
    for (column, datum) in fields {
        match (column, datum) {
            (Column::Name, Datum::Text(name)) => row.name = name,
            (Column::AuthorId, Datum::Integer(author_id)) => row.author_id = Some(author_id),
            // check_fields has already rejected mistyped assignments
            _ => {}
        }
    }
}

#[async_trait]
impl EntityStore for MemoryStore {
    async fn init_schema(&self) -> Result<()> {
        let mut tables = self.tables.write().await;
        tables.entry(Table::Author).or_default();
        tables.entry(Table::Book).or_default();
        Ok(())
    }

    async fn get(&self, table: Table, predicate: Predicate) -> Result<Option<Row>> {
        predicate.check(table)?;

        let tables = self.tables.read().await;
        let Some(data) = tables.get(&table) else {
            return Ok(None);
        };

        let row = match predicate {
            Predicate::IdEq(id) => data.rows.get(&id),
            _ => data.rows.values().find(|row| predicate.matches(row)),
        };

        Ok(row.cloned())
    }

    async fn list(&self, table: Table, predicate: Predicate, limit: Option<i64>) -> Result<Vec<Row>> {
        predicate.check(table)?;

        let limit = match limit {
            Some(limit) if limit < 0 => {
                return Err(BookgraphError::InvalidArgument(format!(
                    "limit must not be negative, got {}",
                    limit
                )))
            }
            Some(limit) => limit as usize,
            None => usize::MAX,
        };

        let tables = self.tables.read().await;
        let rows = match tables.get(&table) {
            Some(data) => data
                .rows
                .values()
                .filter(|row| predicate.matches(row))
                .take(limit)
                .cloned()
                .collect(),
            None => Vec::new(),
        };

        Ok(rows)
    }

    async fn count(&self, table: Table, predicate: Predicate) -> Result<i64> {
        predicate.check(table)?;

        let tables = self.tables.read().await;
        let count = tables
            .get(&table)
            .map(|data| data.rows.values().filter(|row| predicate.matches(row)).count())
            .unwrap_or(0);

        Ok(count as i64)
    }

    async fn insert(&self, table: Table, fields: Fields) -> Result<i64> {
        check_insert(table, &fields)?;

        let mut tables = self.tables.write().await;
        let data = tables.entry(table).or_default();
        data.last_id += 1;
        let id = data.last_id;

        let mut row = Row {
            id,
            name: String::new(),
            author_id: None,
        };
        apply(&mut row, fields);
        data.rows.insert(id, row);

        Ok(id)
    }

    async fn update(&self, table: Table, id: i64, fields: Fields) -> Result<u64> {
        check_update(table, &fields)?;

        let mut tables = self.tables.write().await;
        match tables.get_mut(&table).and_then(|data| data.rows.get_mut(&id)) {
            Some(row) => {
                apply(row, fields);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn delete(&self, table: Table, predicate: Predicate) -> Result<u64> {
        predicate.check(table)?;

        let mut tables = self.tables.write().await;
        let Some(data) = tables.get_mut(&table) else {
            return Ok(0);
        };

        let before = data.rows.len();
        data.rows.retain(|_, row| !predicate.matches(row));
        Ok((before - data.rows.len()) as u64)
    }

    async fn close(&self) {
        tracing::debug!("Memory store closed");
    }
}
