//! Integration tests for the GraphQL HTTP route's admission path
//!
//! A lazily-connected pool is enough here: a query rejected at admission is
//! answered before any resolver (and therefore any connection) is touched.

mod common;

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use tower::ServiceExt;

use quill_api::graphql::build_schema;
use quill_api::routes::graphql_router;

fn create_test_app() -> Router {
    let pool = common::lazy_pool();
    let schema = build_schema(pool.clone());
    Router::new().nest("/graphql", graphql_router(schema, pool))
}

async fn post_query(app: Router, query: &str) -> (StatusCode, serde_json::Value) {
    let body = serde_json::json!({ "query": query }).to_string();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/graphql")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn overly_deep_query_is_rejected_with_a_validation_error() {
    // 6 levels of nested field selections, one past the bound.
    let query = "{ users { subscribedTo { subscribers { subscribedTo { profile { id } } } } } }";
    let (status, body) = post_query(create_test_app(), query).await;

    assert_eq!(status, StatusCode::OK, "rejections still get an envelope");
    assert!(body.get("data").is_none() || body["data"].is_null());
    let errors = body["errors"].as_array().expect("errors list");
    assert_eq!(errors.len(), 1);
    assert!(errors[0]["message"]
        .as_str()
        .unwrap()
        .contains("maximum depth"));
}

#[tokio::test]
async fn malformed_query_is_rejected_as_a_syntax_error() {
    let (status, body) = post_query(create_test_app(), "{ users { id").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["errors"].as_array().is_some_and(|e| !e.is_empty()));
}

#[tokio::test]
async fn playground_is_served_on_get() {
    let app = create_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/graphql")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}
