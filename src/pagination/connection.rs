use super::cursor::{decode_cursor, encode_cursor, initial_cursor};
use crate::config::PaginationConfig;
use crate::error::{BookgraphError, Result};
use crate::model::Entity;
use crate::store::{EntityStore, Predicate};

/// Information about pagination in a connection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageInfo {
    pub has_next_page: bool,
    /// Echo of the `after` cursor the page was requested with
    pub start_cursor: Option<String>,
    /// Cursor to continue from; only set when another page exists
    pub end_cursor: Option<String>,
}

#[derive(Debug, Clone)]
pub struct Edge<T> {
    pub node: T,
    pub cursor: String,
}

#[derive(Debug, Clone)]
pub struct Connection<T> {
    pub edges: Vec<Edge<T>>,
    pub page_info: PageInfo,
}

impl<T> Connection<T> {
    /// Connection for a page with no rows; every page info field is unset
    pub fn empty() -> Self {
        Self {
            edges: Vec::new(),
            page_info: PageInfo::default(),
        }
    }

    pub fn nodes(&self) -> impl Iterator<Item = &T> {
        self.edges.iter().map(|edge| &edge.node)
    }
}

/// Validated `(first, after)` pair
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub first: i64,
    pub after: String,
}

impl PageRequest {
    /// Apply defaults and bounds to raw client arguments
    ///
    /// A missing `first` becomes the configured default page size and values above
    /// the maximum are clamped. A missing `after` starts before the first row.
    pub fn new(first: Option<i64>, after: Option<String>, config: &PaginationConfig) -> Result<Self> {
        let first = first.unwrap_or(config.default_page_size);
        if first < 0 {
            return Err(BookgraphError::InvalidArgument(format!(
                "first must not be negative, got {}",
                first
            )));
        }

        Ok(Self {
            first: first.min(config.max_page_size),
            after: after.unwrap_or_else(initial_cursor),
        })
    }
}

/// Fetch one page of `E` after `request.after`
///
/// Runs two store calls in order: the bounded list, then a count of every row past
/// the cursor (the page just fetched included). Nothing ties the two together, so
/// a concurrent write between them can make `has_next_page` disagree with what the
/// following fetch returns.
pub async fn fetch_page<E: Entity>(store: &dyn EntityStore, request: &PageRequest) -> Result<Connection<E>> {
    let last_id = decode_cursor(&request.after)?;

    let rows = store
        .list(E::TABLE, Predicate::IdGt(last_id), Some(request.first))
        .await?;

    if rows.is_empty() {
        tracing::debug!("No {} rows after position {}", E::TABLE, last_id);
        return Ok(Connection::empty());
    }

    let remaining = store.count(E::TABLE, Predicate::IdGt(last_id)).await?;
    let has_next_page = remaining > request.first;

    let edges = rows
        .into_iter()
        .map(|row| -> Result<Edge<E>> {
            let node = E::from_row(row)?;
            Ok(Edge {
                cursor: encode_cursor(node.id()),
                node,
            })
        })
        .collect::<Result<Vec<_>>>()?;

    let end_cursor = if has_next_page {
        edges.last().map(|edge| edge.cursor.clone())
    } else {
        None
    };

    tracing::debug!(
        "Fetched {} {} rows after position {} ({} remaining)",
        edges.len(),
        E::TABLE,
        last_id,
        remaining
    );

    Ok(Connection {
        edges,
        page_info: PageInfo {
            has_next_page,
            start_cursor: Some(request.after.clone()),
            end_cursor,
        },
    })
}
