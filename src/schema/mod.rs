/// GraphQL schema for the author/book catalog
///
/// This module builds a dynamic async-graphql schema whose object types map onto
/// the catalog entities, connection types, and mutation payloads.

mod builder;
mod mutation;
mod objects;
mod resolver;

pub use builder::SchemaBuilder;
pub use resolver::{create_all_resolver, create_get_resolver, create_list_resolver};
