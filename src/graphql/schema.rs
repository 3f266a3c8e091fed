//! GraphQL schema builder for Quill

use async_graphql::{EmptySubscription, Schema};
use sqlx::PgPool;

use crate::repositories::{
    MembershipTierRepository, PostRepository, ProfileRepository, SubscriptionRepository,
    UserRepository,
};

use super::mutation::Mutation;
use super::query::Query;

/// The Quill GraphQL schema type
pub type QuillSchema = Schema<Query, Mutation, EmptySubscription>;

/// Build the schema with the shared storage collaborators in its data.
///
/// Only cross-request, read-only-shared state lives here: the pool and the
/// repositories. Per-request state (the loader caches) is injected request by
/// request as a `RequestContext` by the HTTP handler.
pub fn build_schema(pool: PgPool) -> QuillSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(pool.clone())
        .data(UserRepository::new(pool.clone()))
        .data(ProfileRepository::new(pool.clone()))
        .data(PostRepository::new(pool.clone()))
        .data(MembershipTierRepository::new(pool.clone()))
        .data(SubscriptionRepository::new(pool))
        .finish()
}
