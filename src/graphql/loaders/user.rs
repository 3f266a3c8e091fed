//! User bulk fetcher
//!
//! Batches user id lookups into one query, and attaches the denormalized
//! subscription-edge id lists for both traversal directions so the
//! `subscribedTo` / `subscribers` resolvers can expand ids through the user
//! loader instead of joining per user.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::graphql::batch::BatchFetch;
use crate::models::{SubscriptionEdge, User, UserWithSubscriptions};

/// Bulk fetcher for users by id
#[derive(Clone)]
pub struct UserLoader {
    pool: PgPool,
}

impl UserLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BatchFetch for UserLoader {
    type Key = Uuid;
    type Value = UserWithSubscriptions;
    type Error = Arc<sqlx::Error>;

    async fn fetch(
        &self,
        keys: &[Uuid],
    ) -> Result<HashMap<Uuid, UserWithSubscriptions>, Arc<sqlx::Error>> {
        let users: Vec<User> =
            sqlx::query_as("SELECT id, name, balance FROM users WHERE id = ANY($1)")
                .bind(keys)
                .fetch_all(&self.pool)
                .await
                .map_err(Arc::new)?;

        // One edge query covers both directions for the whole batch.
        let edges: Vec<SubscriptionEdge> = sqlx::query_as(
            "SELECT subscriber_id, author_id FROM subscription_edges \
             WHERE subscriber_id = ANY($1) OR author_id = ANY($1)",
        )
        .bind(keys)
        .fetch_all(&self.pool)
        .await
        .map_err(Arc::new)?;

        let mut result: HashMap<Uuid, UserWithSubscriptions> = users
            .into_iter()
            .map(|user| (user.id, UserWithSubscriptions::without_edges(user)))
            .collect();

        for edge in edges {
            if let Some(subscriber) = result.get_mut(&edge.subscriber_id) {
                subscriber.subscribed_to_ids.push(edge.author_id);
            }
            if let Some(author) = result.get_mut(&edge.author_id) {
                author.subscriber_ids.push(edge.subscriber_id);
            }
        }

        Ok(result)
    }
}
