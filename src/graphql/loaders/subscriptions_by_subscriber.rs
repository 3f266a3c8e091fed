//! Subscriptions-by-subscriber bulk fetcher
//!
//! Keyed by subscriber id; yields the author ids that subscriber follows.
//! Resolvers expand the ids into users through the user loader, so nested
//! subscription traversals stay one batch per level.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::graphql::batch::BatchFetch;
use crate::models::SubscriptionEdge;

/// Bulk fetcher for followed-author ids keyed by subscriber
#[derive(Clone)]
pub struct SubscriptionsBySubscriberLoader {
    pool: PgPool,
}

impl SubscriptionsBySubscriberLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BatchFetch for SubscriptionsBySubscriberLoader {
    type Key = Uuid;
    type Value = Vec<Uuid>;
    type Error = Arc<sqlx::Error>;

    async fn fetch(
        &self,
        keys: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Uuid>>, Arc<sqlx::Error>> {
        let edges: Vec<SubscriptionEdge> = sqlx::query_as(
            "SELECT subscriber_id, author_id FROM subscription_edges \
             WHERE subscriber_id = ANY($1)",
        )
        .bind(keys)
        .fetch_all(&self.pool)
        .await
        .map_err(Arc::new)?;

        let mut result: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for edge in edges {
            result.entry(edge.subscriber_id).or_default().push(edge.author_id);
        }

        // Subscribers with no edges get an empty list, not an absence
        for key in keys {
            result.entry(*key).or_default();
        }

        Ok(result)
    }
}
