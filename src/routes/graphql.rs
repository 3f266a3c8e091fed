//! GraphQL HTTP route
//!
//! `POST /graphql` drives one request through its full lifecycle:
//! received → parsed → depth-validated → executed → completed. A query
//! rejected by admission short-circuits with the validation error list and
//! never touches a resolver or loader. An admitted query executes with a
//! fresh `RequestContext` in its request-scoped data, so loader caches live
//! and die with the request. `GET /graphql` serves the playground.

use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    extract::Extension,
    routing::post,
    Router,
};
use sqlx::PgPool;

use crate::graphql::{admission, QuillSchema, RequestContext};

/// Create the GraphQL router
pub fn graphql_router(schema: QuillSchema, pool: PgPool) -> Router {
    Router::new()
        .route("/", post(graphql_handler).get(playground))
        .layer(Extension(schema))
        .layer(Extension(pool))
}

async fn graphql_handler(
    Extension(schema): Extension<QuillSchema>,
    Extension(pool): Extension<PgPool>,
    req: GraphQLRequest,
) -> GraphQLResponse {
    let mut request = req.into_inner();

    if let Err(errors) = admission::admit(&request.query, admission::MAX_QUERY_DEPTH) {
        tracing::debug!(error_count = errors.len(), "query rejected at admission");
        return async_graphql::Response::from_errors(errors).into();
    }

    request = request.data(RequestContext::new(pool));
    schema.execute(request).await.into()
}

async fn playground() -> impl axum::response::IntoResponse {
    axum::response::Html(async_graphql::http::playground_source(
        async_graphql::http::GraphQLPlaygroundConfig::new("/graphql"),
    ))
}
