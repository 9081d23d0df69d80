/// Integration tests for the GraphQL surface
///
/// These tests execute queries and mutations directly against the built schema,
/// backed by the in-process store seeded with two authors and six books.

mod graphql_api_tests {
    use async_graphql::dynamic::Schema;
    use async_graphql::{Request, Value, Variables};
    use bookgraph::pagination::encode_cursor;
    use bookgraph::{Book, Catalog, MemoryStore, PaginationConfig, SchemaBuilder};
    use serde_json::{json, Value as Json};
    use std::sync::Arc;

    async fn seeded_schema() -> Schema {
        let catalog = Catalog::new(Arc::new(MemoryStore::new()), PaginationConfig::default());

        for name in ["J.K. Rowling", "J.R.R. Tolkien"] {
            catalog.add_author(name.to_string()).await.unwrap();
        }
        let books = [
            ("Harry Potter and the Chamber of Secrets", 1),
            ("Harry Potter and the Prisoner of Azkaban", 1),
            ("Harry Potter and the Goblet of Fire", 1),
            ("The Fellowship of the Ring", 2),
            ("The Two Towers", 2),
            ("The Return of the King", 2),
        ];
        for (name, author_id) in books {
            catalog.add_book(name.to_string(), author_id).await.unwrap();
        }

        SchemaBuilder::new(catalog).build().expect("Failed to build schema")
    }

    async fn execute(schema: &Schema, query: &str, variables: Json) -> Json {
        let request = Request::new(query).variables(Variables::from_json(variables));
        let response = schema.execute(request).await;

        assert!(
            response.errors.is_empty(),
            "Query should execute without errors: {:?}",
            response.errors
        );

        response.data.into_json().expect("Should have data")
    }

    const LIST_BOOKS: &str = r#"
        query ($first: Int, $after: String) {
            listBooks(first: $first, after: $after) {
                edges { cursor node { id name authorId } }
                pageInfo { hasNextPage startCursor endCursor }
            }
        }
    "#;

    fn edge_ids(data: &Json) -> Vec<i64> {
        data["listBooks"]["edges"]
            .as_array()
            .unwrap()
            .iter()
            .map(|edge| edge["node"]["id"].as_i64().unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_paginates_books_two_at_a_time() {
        let schema = seeded_schema().await;

        let data = execute(
            &schema,
            LIST_BOOKS,
            json!({ "first": 2, "after": encode_cursor(0) }),
        )
        .await;
        assert_eq!(edge_ids(&data), vec![1, 2]);
        assert_eq!(data["listBooks"]["pageInfo"]["hasNextPage"], json!(true));
        assert_eq!(data["listBooks"]["pageInfo"]["startCursor"], json!(encode_cursor(0)));
        assert_eq!(data["listBooks"]["pageInfo"]["endCursor"], json!(encode_cursor(2)));
        assert_eq!(data["listBooks"]["edges"][1]["cursor"], json!(encode_cursor(2)));

        let data = execute(
            &schema,
            LIST_BOOKS,
            json!({ "first": 2, "after": encode_cursor(2) }),
        )
        .await;
        assert_eq!(edge_ids(&data), vec![3, 4]);
        assert_eq!(data["listBooks"]["pageInfo"]["endCursor"], json!(encode_cursor(4)));

        let data = execute(
            &schema,
            LIST_BOOKS,
            json!({ "first": 2, "after": encode_cursor(4) }),
        )
        .await;
        assert_eq!(edge_ids(&data), vec![5, 6]);
        assert_eq!(data["listBooks"]["pageInfo"]["hasNextPage"], json!(false));
        assert_eq!(data["listBooks"]["pageInfo"]["endCursor"], Json::Null);
    }

    #[tokio::test]
    async fn test_default_arguments_start_at_the_beginning() {
        let schema = seeded_schema().await;

        let data = execute(&schema, LIST_BOOKS, json!({})).await;

        assert_eq!(edge_ids(&data), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(data["listBooks"]["pageInfo"]["hasNextPage"], json!(false));
        assert_eq!(data["listBooks"]["pageInfo"]["startCursor"], json!(encode_cursor(0)));
    }

    #[tokio::test]
    async fn test_nodes_deserialize_as_books() {
        let schema = seeded_schema().await;

        let data = execute(&schema, LIST_BOOKS, json!({ "first": 1 })).await;
        let book: Book = serde_json::from_value(data["listBooks"]["edges"][0]["node"].clone()).unwrap();

        assert_eq!(
            book,
            Book {
                id: 1,
                name: "Harry Potter and the Chamber of Secrets".to_string(),
                author_id: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_page_past_the_end_is_empty() {
        let schema = seeded_schema().await;

        let data = execute(
            &schema,
            LIST_BOOKS,
            json!({ "first": 2, "after": encode_cursor(6) }),
        )
        .await;

        assert!(edge_ids(&data).is_empty());
        assert_eq!(data["listBooks"]["pageInfo"]["hasNextPage"], json!(false));
        assert_eq!(data["listBooks"]["pageInfo"]["startCursor"], Json::Null);
        assert_eq!(data["listBooks"]["pageInfo"]["endCursor"], Json::Null);
    }

    #[tokio::test]
    async fn test_author_connection_uses_same_end_cursor_policy() {
        let schema = seeded_schema().await;
        let query = r#"
            query ($first: Int) {
                listAuthors(first: $first) {
                    edges { node { name } }
                    pageInfo { hasNextPage endCursor }
                }
            }
        "#;

        let data = execute(&schema, query, json!({ "first": 1 })).await;
        assert_eq!(data["listAuthors"]["edges"][0]["node"]["name"], json!("J.K. Rowling"));
        assert_eq!(data["listAuthors"]["pageInfo"]["endCursor"], json!(encode_cursor(1)));

        let data = execute(&schema, query, json!({ "first": 5 })).await;
        assert_eq!(data["listAuthors"]["edges"].as_array().unwrap().len(), 2);
        assert_eq!(data["listAuthors"]["pageInfo"]["hasNextPage"], json!(false));
        assert_eq!(data["listAuthors"]["pageInfo"]["endCursor"], Json::Null);
    }

    #[tokio::test]
    async fn test_malformed_cursor_is_a_client_error() {
        let schema = seeded_schema().await;

        let request = Request::new(LIST_BOOKS)
            .variables(Variables::from_json(json!({ "after": "not-a-cursor" })));
        let response = schema.execute(request).await;

        assert_eq!(response.errors.len(), 1);
        let code = response.errors[0]
            .extensions
            .as_ref()
            .and_then(|ext| ext.get("code"))
            .cloned();
        assert_eq!(code, Some(Value::from("BAD_USER_INPUT")));
    }

    #[tokio::test]
    async fn test_negative_first_is_a_client_error() {
        let schema = seeded_schema().await;

        let request = Request::new(LIST_BOOKS).variables(Variables::from_json(json!({ "first": -1 })));
        let response = schema.execute(request).await;

        assert_eq!(response.errors.len(), 1);
        assert!(response.errors[0].message.contains("first"));
    }

    #[tokio::test]
    async fn test_book_author_matches_direct_lookup() {
        let schema = seeded_schema().await;

        let data = execute(
            &schema,
            r#"{
                getBook(id: 5) { name author { id name } }
                getAuthor(id: 2) { id name }
            }"#,
            json!({}),
        )
        .await;

        assert_eq!(data["getBook"]["name"], json!("The Two Towers"));
        assert_eq!(data["getBook"]["author"], data["getAuthor"]);
    }

    #[tokio::test]
    async fn test_author_books_are_exactly_their_books() {
        let schema = seeded_schema().await;

        let data = execute(
            &schema,
            r#"{ getAuthor(id: 1) { books { id authorId } } }"#,
            json!({}),
        )
        .await;

        let books = data["getAuthor"]["books"].as_array().unwrap();
        let ids: Vec<i64> = books.iter().map(|b| b["id"].as_i64().unwrap()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert!(books.iter().all(|b| b["authorId"] == json!(1)));
    }

    #[tokio::test]
    async fn test_dangling_author_resolves_to_null() {
        let schema = seeded_schema().await;

        let data = execute(
            &schema,
            r#"mutation { addBook(name: "Silmarillion draft", authorId: 99) { id author { name } } }"#,
            json!({}),
        )
        .await;

        assert_eq!(data["addBook"]["id"], json!(7));
        assert_eq!(data["addBook"]["author"], Json::Null);
    }

    #[tokio::test]
    async fn test_missing_entities_are_null() {
        let schema = seeded_schema().await;

        let data = execute(
            &schema,
            r#"{ getBook(id: 100) { id } getAuthor(id: 100) { id } }"#,
            json!({}),
        )
        .await;

        assert_eq!(data["getBook"], Json::Null);
        assert_eq!(data["getAuthor"], Json::Null);
    }

    #[tokio::test]
    async fn test_add_update_delete_author() {
        let schema = seeded_schema().await;

        let data = execute(
            &schema,
            r#"mutation { addAuthor(name: "Brent Weeks") { id name } }"#,
            json!({}),
        )
        .await;
        assert_eq!(data["addAuthor"], json!({ "id": 3, "name": "Brent Weeks" }));

        let data = execute(
            &schema,
            r#"mutation { updateAuthor(id: 3, name: "B. Weeks") { id name } }"#,
            json!({}),
        )
        .await;
        assert_eq!(data["updateAuthor"], json!({ "id": 3, "name": "B. Weeks" }));

        let data = execute(
            &schema,
            r#"mutation { deleteAuthor(id: 3) { ok } }"#,
            json!({}),
        )
        .await;
        assert_eq!(data["deleteAuthor"]["ok"], json!(true));

        let data = execute(&schema, r#"{ getAuthor(id: 3) { id } }"#, json!({})).await;
        assert_eq!(data["getAuthor"], Json::Null);
    }

    #[tokio::test]
    async fn test_update_book_moves_it_between_authors() {
        let schema = seeded_schema().await;

        let data = execute(
            &schema,
            r#"mutation { updateBook(id: 1, name: "Moved", authorId: 2) { id name authorId } }"#,
            json!({}),
        )
        .await;
        assert_eq!(data["updateBook"], json!({ "id": 1, "name": "Moved", "authorId": 2 }));

        let data = execute(
            &schema,
            r#"{ getAuthor(id: 2) { books { id } } }"#,
            json!({}),
        )
        .await;
        let ids: Vec<i64> = data["getAuthor"]["books"]
            .as_array()
            .unwrap()
            .iter()
            .map(|b| b["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![1, 4, 5, 6]);
    }

    #[tokio::test]
    async fn test_update_missing_book_returns_null() {
        let schema = seeded_schema().await;

        let data = execute(
            &schema,
            r#"mutation { updateBook(id: 404, name: "Nothing", authorId: 1) { id } }"#,
            json!({}),
        )
        .await;

        assert_eq!(data["updateBook"], Json::Null);
    }

    #[tokio::test]
    async fn test_delete_missing_book_is_ok() {
        let schema = seeded_schema().await;

        let data = execute(
            &schema,
            r#"mutation { deleteBook(id: 999) { ok } }"#,
            json!({}),
        )
        .await;

        assert_eq!(data["deleteBook"]["ok"], json!(true));

        let data = execute(&schema, r#"{ books { id } }"#, json!({})).await;
        assert_eq!(data["books"].as_array().unwrap().len(), 6);
    }

    #[tokio::test]
    async fn test_deleted_book_disappears_from_pages() {
        let schema = seeded_schema().await;

        execute(&schema, r#"mutation { deleteBook(id: 2) { ok } }"#, json!({})).await;

        let data = execute(&schema, LIST_BOOKS, json!({ "first": 2 })).await;
        assert_eq!(edge_ids(&data), vec![1, 3]);
        assert_eq!(data["listBooks"]["pageInfo"]["endCursor"], json!(encode_cursor(3)));
    }

    #[tokio::test]
    async fn test_plain_lists() {
        let schema = seeded_schema().await;

        let data = execute(&schema, r#"{ books { id } authors { name } }"#, json!({})).await;

        assert_eq!(data["books"].as_array().unwrap().len(), 6);
        assert_eq!(
            data["authors"],
            json!([{ "name": "J.K. Rowling" }, { "name": "J.R.R. Tolkien" }])
        );
    }
}
