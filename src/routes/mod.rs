//! HTTP route handlers for the Quill API

pub mod graphql;
pub mod health;

pub use graphql::graphql_router;
pub use health::health_router;
