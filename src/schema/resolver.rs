/// Query root resolvers
///
/// Each entity gets three fields:
/// - `list<Plural>(first, after)` - cursor-paginated connection
/// - `get<Name>(id)` - point lookup, null when missing
/// - `<plural>` - every row, unpaginated

use crate::catalog::Catalog;
use crate::model::Entity;
use crate::schema::objects::connection_type_name;

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, ResolverContext, TypeRef};
use async_graphql::ErrorExtensions;

/// Create get<Name>(id) resolver for an entity
pub fn create_get_resolver<E: Entity>() -> Field {
    let field_name = format!("get{}", E::TYPE_NAME);

    Field::new(field_name, TypeRef::named(E::TYPE_NAME), |ctx: ResolverContext| {
        FieldFuture::new(async move {
            let id = ctx.args.try_get("id")?.i64()?;
            let catalog = ctx.data::<Catalog>()?;

            let entity = catalog.get::<E>(id).await.map_err(|e| e.extend())?;
            Ok(entity.map(FieldValue::owned_any))
        })
    })
    .argument(InputValue::new("id", TypeRef::named_nn(TypeRef::INT)))
}

/// Create list<Plural>(first, after) connection resolver for an entity
pub fn create_list_resolver<E: Entity>() -> Field {
    let field_name = format!("list{}", E::PLURAL);

    Field::new(
        field_name,
        TypeRef::named_nn(connection_type_name::<E>()),
        |ctx: ResolverContext| {
            FieldFuture::new(async move {
                // Both arguments are nullable; an explicit null means "use the default"
                let first = ctx.args.get("first").and_then(|v| v.i64().ok());
                let after = ctx
                    .args
                    .get("after")
                    .and_then(|v| v.string().ok().map(str::to_string));

                let catalog = ctx.data::<Catalog>()?;
                let connection = catalog
                    .page::<E>(first, after)
                    .await
                    .map_err(|e| e.extend())?;

                Ok(Some(FieldValue::owned_any(connection)))
            })
        },
    )
    .argument(
        InputValue::new("first", TypeRef::named(TypeRef::INT))
            .description("Page size; defaults to the configured page size"),
    )
    .argument(
        InputValue::new("after", TypeRef::named(TypeRef::STRING))
            .description("Return rows after this cursor; defaults to the start"),
    )
}

/// Create the unpaginated <plural> resolver for an entity
pub fn create_all_resolver<E: Entity>() -> Field {
    let field_name = E::PLURAL.to_lowercase();

    Field::new(
        field_name,
        TypeRef::named_nn_list_nn(E::TYPE_NAME),
        |ctx: ResolverContext| {
            FieldFuture::new(async move {
                let catalog = ctx.data::<Catalog>()?;
                let entities = catalog.all::<E>().await.map_err(|e| e.extend())?;
                Ok(Some(FieldValue::list(entities.into_iter().map(FieldValue::owned_any))))
            })
        },
    )
}
