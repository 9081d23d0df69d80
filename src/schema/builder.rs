/// GraphQL schema builder
///
/// Assembles the Query and Mutation roots and every object type around a
/// `Catalog`. `Schema::finish` validates all type references, so a schema that
/// builds is internally consistent.

use crate::catalog::Catalog;
use crate::error::{BookgraphError, Result};
use crate::model::{Author, Book};
use crate::schema::mutation::create_mutation_type;
use crate::schema::objects::all_types;
use crate::schema::resolver::{create_all_resolver, create_get_resolver, create_list_resolver};

use async_graphql::dynamic::{Object, Schema};

pub struct SchemaBuilder {
    catalog: Catalog,
}

impl SchemaBuilder {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }

    /// Build the executable schema with the catalog attached as context data
    pub fn build(self) -> Result<Schema> {
        let query = Object::new("Query")
            .field(create_list_resolver::<Book>())
            .field(create_get_resolver::<Book>())
            .field(create_all_resolver::<Book>())
            .field(create_list_resolver::<Author>())
            .field(create_get_resolver::<Author>())
            .field(create_all_resolver::<Author>());

        let mutation = create_mutation_type();

        let mut schema_builder =
            Schema::build(query.type_name(), Some(mutation.type_name()), None);

        for object in all_types() {
            tracing::debug!("Registering type {}", object.type_name());
            schema_builder = schema_builder.register(object);
        }

        let schema = schema_builder
            .register(query)
            .register(mutation)
            .data(self.catalog)
            .finish()
            .map_err(|e| {
                BookgraphError::SchemaGeneration(format!("Failed to build schema: {}", e))
            })?;

        tracing::info!("GraphQL schema built");
        Ok(schema)
    }
}
