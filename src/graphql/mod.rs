//! GraphQL layer for Quill
//!
//! This module contains:
//! - The request-scoped batching/caching primitive (`batch`)
//! - Bulk fetchers wiring the primitive to storage, one per entity kind
//!   (`loaders`)
//! - The per-request context bundling loaders and the storage handle
//!   (`context`)
//! - The parse-and-depth-validate admission gate (`admission`)
//! - Query, mutation, and object type resolvers, plus the schema builder

pub mod admission;
pub mod batch;
pub mod context;
pub mod loaders;
pub mod mutation;
pub mod query;
pub mod schema;
pub mod types;

pub use admission::{admit, MAX_QUERY_DEPTH};
pub use context::RequestContext;
pub use schema::{build_schema, QuillSchema};
