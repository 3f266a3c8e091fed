//! Subscription edge repository
//!
//! Writes to the (subscriber_id, author_id) edge table. The pair is the
//! primary key, so duplicate subscriptions are impossible by construction.

use sqlx::PgPool;
use uuid::Uuid;

/// Repository for subscription edge operations
#[derive(Clone)]
pub struct SubscriptionRepository {
    pool: PgPool,
}

impl SubscriptionRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the subscriber→author edge. Subscribing twice is a no-op.
    pub async fn subscribe(&self, subscriber_id: Uuid, author_id: Uuid) -> Result<(), sqlx::Error> {
        sqlx::query(
            "INSERT INTO subscription_edges (subscriber_id, author_id) VALUES ($1, $2) \
             ON CONFLICT DO NOTHING",
        )
        .bind(subscriber_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    /// Remove the subscriber→author edge; returns whether one existed.
    pub async fn unsubscribe(
        &self,
        subscriber_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool, sqlx::Error> {
        let result = sqlx::query(
            "DELETE FROM subscription_edges WHERE subscriber_id = $1 AND author_id = $2",
        )
        .bind(subscriber_id)
        .bind(author_id)
        .execute(&self.pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }
}
