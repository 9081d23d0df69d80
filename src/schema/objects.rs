/// GraphQL object types for entities, connections and mutation payloads
///
/// Parent values are carried as `FieldValue::owned_any` of the Rust type, and each
/// field resolver downcasts back to it.

use crate::catalog::{Catalog, DeleteResult};
use crate::model::{Author, Book, Entity};
use crate::pagination::{Connection, Edge, PageInfo};

use async_graphql::dynamic::{Field, FieldFuture, FieldValue, Object, TypeRef};
use async_graphql::{ErrorExtensions, Value};
use std::any::Any;

pub const PAGE_INFO: &str = "PageInfo";
pub const DELETE_RESULT: &str = "DeleteResult";

pub fn edge_type_name<E: Entity>() -> String {
    format!("{}Edge", E::TYPE_NAME)
}

pub fn connection_type_name<E: Entity>() -> String {
    format!("{}Connection", E::TYPE_NAME)
}

/// Field computed from the parent value alone
fn value_field<T, F>(name: &str, type_ref: TypeRef, extract: F) -> Field
where
    T: Any + Send + Sync,
    F: Fn(&T) -> Value + Send + Sync + 'static,
{
    Field::new(name, type_ref, move |ctx| {
        let value = ctx.parent_value.try_downcast_ref::<T>().map(&extract);
        FieldFuture::new(async move { Ok(Some(FieldValue::value(value?))) })
    })
}

fn optional_string(value: &Option<String>) -> Value {
    match value {
        Some(s) => Value::from(s.clone()),
        None => Value::Null,
    }
}

pub fn author_type() -> Object {
    Object::new(Author::TYPE_NAME)
        .description("A writer of books")
        .field(value_field("id", TypeRef::named_nn(TypeRef::INT), |author: &Author| {
            Value::from(author.id)
        }))
        .field(value_field("name", TypeRef::named_nn(TypeRef::STRING), |author: &Author| {
            Value::from(author.name.clone())
        }))
        .field(
            Field::new("books", TypeRef::named_nn_list_nn(Book::TYPE_NAME), |ctx| {
                FieldFuture::new(async move {
                    let author = ctx.parent_value.try_downcast_ref::<Author>()?;
                    let catalog = ctx.data::<Catalog>()?;

                    let books = catalog.books_of(author).await.map_err(|e| e.extend())?;
                    Ok(Some(FieldValue::list(books.into_iter().map(FieldValue::owned_any))))
                })
            })
            .description("Books written by this author"),
        )
}

pub fn book_type() -> Object {
    Object::new(Book::TYPE_NAME)
        .description("A book and the id of its author")
        .field(value_field("id", TypeRef::named_nn(TypeRef::INT), |book: &Book| {
            Value::from(book.id)
        }))
        .field(value_field("name", TypeRef::named_nn(TypeRef::STRING), |book: &Book| {
            Value::from(book.name.clone())
        }))
        .field(value_field("authorId", TypeRef::named_nn(TypeRef::INT), |book: &Book| {
            Value::from(book.author_id)
        }))
        .field(
            Field::new("author", TypeRef::named(Author::TYPE_NAME), |ctx| {
                FieldFuture::new(async move {
                    let book = ctx.parent_value.try_downcast_ref::<Book>()?;
                    let catalog = ctx.data::<Catalog>()?;

                    let author = catalog.author_of(book).await.map_err(|e| e.extend())?;
                    Ok(author.map(FieldValue::owned_any))
                })
            })
            .description("Null when authorId references no author"),
        )
}

pub fn page_info_type() -> Object {
    Object::new(PAGE_INFO)
        .description("Information about pagination in a connection")
        .field(value_field(
            "hasNextPage",
            TypeRef::named_nn(TypeRef::BOOLEAN),
            |info: &PageInfo| Value::from(info.has_next_page),
        ))
        .field(
            value_field("startCursor", TypeRef::named(TypeRef::STRING), |info: &PageInfo| {
                optional_string(&info.start_cursor)
            })
            .description("The `after` cursor this page was requested with"),
        )
        .field(
            value_field("endCursor", TypeRef::named(TypeRef::STRING), |info: &PageInfo| {
                optional_string(&info.end_cursor)
            })
            .description("Cursor to pass as `after` for the next page; null on the last page"),
        )
}

pub fn edge_type<E: Entity>() -> Object {
    Object::new(edge_type_name::<E>())
        .field(Field::new("node", TypeRef::named_nn(E::TYPE_NAME), |ctx| {
            FieldFuture::new(async move {
                let edge = ctx.parent_value.try_downcast_ref::<Edge<E>>()?;
                Ok(Some(FieldValue::owned_any(edge.node.clone())))
            })
        }))
        .field(value_field("cursor", TypeRef::named_nn(TypeRef::STRING), |edge: &Edge<E>| {
            Value::from(edge.cursor.clone())
        }))
}

pub fn connection_type<E: Entity>() -> Object {
    Object::new(connection_type_name::<E>())
        .field(Field::new(
            "edges",
            TypeRef::named_nn_list_nn(edge_type_name::<E>()),
            |ctx| {
                FieldFuture::new(async move {
                    let connection = ctx.parent_value.try_downcast_ref::<Connection<E>>()?;
                    let edges = connection.edges.iter().cloned().map(FieldValue::owned_any);
                    Ok(Some(FieldValue::list(edges)))
                })
            },
        ))
        .field(Field::new("pageInfo", TypeRef::named_nn(PAGE_INFO), |ctx| {
            FieldFuture::new(async move {
                let connection = ctx.parent_value.try_downcast_ref::<Connection<E>>()?;
                Ok(Some(FieldValue::owned_any(connection.page_info.clone())))
            })
        }))
}

pub fn delete_result_type() -> Object {
    Object::new(DELETE_RESULT)
        .description("Outcome of a delete; ok is true even if nothing matched the id")
        .field(value_field("ok", TypeRef::named_nn(TypeRef::BOOLEAN), |result: &DeleteResult| {
            Value::from(result.ok)
        }))
}

/// Every object type the schema registers besides Query and Mutation
pub fn all_types() -> Vec<Object> {
    vec![
        author_type(),
        book_type(),
        page_info_type(),
        edge_type::<Author>(),
        edge_type::<Book>(),
        connection_type::<Author>(),
        connection_type::<Book>(),
        delete_result_type(),
    ]
}
