//! Per-request GraphQL context
//!
//! One `RequestContext` is built for every admitted request and injected into
//! async-graphql's request-scoped data, so each execution gets its own set of
//! loader caches. Nothing here is global: two concurrent requests share the
//! connection pool (read-only sharing) but never each other's caches, and a
//! context becomes unreachable when its request completes.

use sqlx::PgPool;

use super::batch::BatchLoader;
use super::loaders::{
    MembershipTierLoader, PostsByAuthorLoader, ProfileByUserLoader,
    SubscriptionsBySubscriberLoader, UserLoader,
};

/// One batch loader per entity kind.
pub struct EntityLoaders {
    pub user: BatchLoader<UserLoader>,
    pub membership_tier: BatchLoader<MembershipTierLoader>,
    pub posts_by_author: BatchLoader<PostsByAuthorLoader>,
    pub profile_by_user: BatchLoader<ProfileByUserLoader>,
    pub subscriptions_by_subscriber: BatchLoader<SubscriptionsBySubscriberLoader>,
}

impl EntityLoaders {
    fn new(pool: &PgPool) -> Self {
        Self {
            user: BatchLoader::new(UserLoader::new(pool.clone())),
            membership_tier: BatchLoader::new(MembershipTierLoader::new(pool.clone())),
            posts_by_author: BatchLoader::new(PostsByAuthorLoader::new(pool.clone())),
            profile_by_user: BatchLoader::new(ProfileByUserLoader::new(pool.clone())),
            subscriptions_by_subscriber: BatchLoader::new(SubscriptionsBySubscriberLoader::new(
                pool.clone(),
            )),
        }
    }
}

/// The bundle resolvers pull out of the execution context: loaders plus the
/// storage handle. Construction only allocates; no I/O happens until a
/// resolver loads something.
pub struct RequestContext {
    pub pool: PgPool,
    pub loaders: EntityLoaders,
}

impl RequestContext {
    pub fn new(pool: PgPool) -> Self {
        let loaders = EntityLoaders::new(&pool);
        Self { pool, loaders }
    }
}
