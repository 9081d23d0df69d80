/// Mutation root: add, update and delete for authors and books

use crate::catalog::Catalog;
use crate::model::{Author, Book, Entity};
use crate::schema::objects::DELETE_RESULT;

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, InputValue, Object, ResolverContext, TypeRef};
use async_graphql::ErrorExtensions;

pub fn create_mutation_type() -> Object {
    Object::new("Mutation")
        .field(add_author())
        .field(add_book())
        .field(update_author())
        .field(update_book())
        .field(delete_author())
        .field(delete_book())
}

fn id_arg() -> InputValue {
    InputValue::new("id", TypeRef::named_nn(TypeRef::INT))
}

fn name_arg() -> InputValue {
    InputValue::new("name", TypeRef::named_nn(TypeRef::STRING))
}

fn author_id_arg() -> InputValue {
    InputValue::new("authorId", TypeRef::named_nn(TypeRef::INT))
}

fn add_author() -> Field {
    Field::new("addAuthor", TypeRef::named_nn(Author::TYPE_NAME), |ctx: ResolverContext| {
        FieldFuture::new(async move {
            let name = ctx.args.try_get("name")?.string()?.to_string();
            let catalog = ctx.data::<Catalog>()?;

            let author = catalog.add_author(name).await.map_err(|e| e.extend())?;
            Ok(Some(FieldValue::owned_any(author)))
        })
    })
    .argument(name_arg())
}

fn add_book() -> Field {
    Field::new("addBook", TypeRef::named_nn(Book::TYPE_NAME), |ctx: ResolverContext| {
        FieldFuture::new(async move {
            let name = ctx.args.try_get("name")?.string()?.to_string();
            let author_id = ctx.args.try_get("authorId")?.i64()?;
            let catalog = ctx.data::<Catalog>()?;

            let book = catalog
                .add_book(name, author_id)
                .await
                .map_err(|e| e.extend())?;
            Ok(Some(FieldValue::owned_any(book)))
        })
    })
    .argument(name_arg())
    .argument(author_id_arg())
}

fn update_author() -> Field {
    Field::new("updateAuthor", TypeRef::named(Author::TYPE_NAME), |ctx: ResolverContext| {
        FieldFuture::new(async move {
            let id = ctx.args.try_get("id")?.i64()?;
            let name = ctx.args.try_get("name")?.string()?.to_string();
            let catalog = ctx.data::<Catalog>()?;

            let author = catalog
                .update_author(id, name)
                .await
                .map_err(|e| e.extend())?;
            Ok(author.map(FieldValue::owned_any))
        })
    })
    .argument(id_arg())
    .argument(name_arg())
    .description("Returns null when no author has the given id")
}

fn update_book() -> Field {
    Field::new("updateBook", TypeRef::named(Book::TYPE_NAME), |ctx: ResolverContext| {
        FieldFuture::new(async move {
            let id = ctx.args.try_get("id")?.i64()?;
            let name = ctx.args.try_get("name")?.string()?.to_string();
            let author_id = ctx.args.try_get("authorId")?.i64()?;
            let catalog = ctx.data::<Catalog>()?;

            let book = catalog
                .update_book(id, name, author_id)
                .await
                .map_err(|e| e.extend())?;
            Ok(book.map(FieldValue::owned_any))
        })
    })
    .argument(id_arg())
    .argument(name_arg())
    .argument(author_id_arg())
    .description("Returns null when no book has the given id")
}

fn delete_author() -> Field {
    Field::new("deleteAuthor", TypeRef::named_nn(DELETE_RESULT), |ctx: ResolverContext| {
        FieldFuture::new(async move {
            let id = ctx.args.try_get("id")?.i64()?;
            let catalog = ctx.data::<Catalog>()?;

            let result = catalog.delete_author(id).await;
            Ok(Some(FieldValue::owned_any(result)))
        })
    })
    .argument(id_arg())
}

fn delete_book() -> Field {
    Field::new("deleteBook", TypeRef::named_nn(DELETE_RESULT), |ctx: ResolverContext| {
        FieldFuture::new(async move {
            let id = ctx.args.try_get("id")?.i64()?;
            let catalog = ctx.data::<Catalog>()?;

            let result = catalog.delete_book(id).await;
            Ok(Some(FieldValue::owned_any(result)))
        })
    })
    .argument(id_arg())
}
