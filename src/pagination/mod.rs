/// Cursor-based pagination over primary keys
///
/// Cursors are base64 of `cursor_<id>`. A page is everything with an id greater
/// than the decoded `after` position, in ascending id order.

mod connection;
mod cursor;

pub use connection::{fetch_page, Connection, Edge, PageInfo, PageRequest};
pub use cursor::{decode_cursor, encode_cursor, initial_cursor};
