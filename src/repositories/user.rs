//! User repository

use std::collections::HashMap;

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::{SubscriptionEdge, User, UserWithSubscriptions};

/// Repository for user database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// List every user together with both subscription-edge id lists.
    ///
    /// Used by the top-level `users` query, which primes the user loader with
    /// each row so descendant resolvers skip per-user refetches.
    pub async fn list_with_subscriptions(
        &self,
    ) -> Result<Vec<UserWithSubscriptions>, sqlx::Error> {
        let users: Vec<User> = sqlx::query_as("SELECT id, name, balance FROM users ORDER BY name")
            .fetch_all(&self.pool)
            .await?;

        let edges: Vec<SubscriptionEdge> =
            sqlx::query_as("SELECT subscriber_id, author_id FROM subscription_edges")
                .fetch_all(&self.pool)
                .await?;

        let mut outgoing: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        let mut incoming: HashMap<Uuid, Vec<Uuid>> = HashMap::new();
        for edge in edges {
            outgoing.entry(edge.subscriber_id).or_default().push(edge.author_id);
            incoming.entry(edge.author_id).or_default().push(edge.subscriber_id);
        }

        Ok(users
            .into_iter()
            .map(|user| {
                let subscribed_to_ids = outgoing.remove(&user.id).unwrap_or_default();
                let subscriber_ids = incoming.remove(&user.id).unwrap_or_default();
                UserWithSubscriptions {
                    user,
                    subscribed_to_ids,
                    subscriber_ids,
                }
            })
            .collect())
    }

    pub async fn create(&self, name: &str, balance: f64) -> Result<User, sqlx::Error> {
        sqlx::query_as(
            "INSERT INTO users (id, name, balance) VALUES (gen_random_uuid(), $1, $2) \
             RETURNING id, name, balance",
        )
        .bind(name)
        .bind(balance)
        .fetch_one(&self.pool)
        .await
    }

    /// Update the provided fields; untouched fields keep their value.
    /// Returns `None` when no user with that id exists.
    pub async fn update(
        &self,
        id: Uuid,
        name: Option<&str>,
        balance: Option<f64>,
    ) -> Result<Option<User>, sqlx::Error> {
        sqlx::query_as(
            "UPDATE users SET name = COALESCE($2, name), balance = COALESCE($3, balance) \
             WHERE id = $1 RETURNING id, name, balance",
        )
        .bind(id)
        .bind(name)
        .bind(balance)
        .fetch_optional(&self.pool)
        .await
    }

    /// Delete a user; profile, posts, and subscription edges cascade.
    /// Returns whether a row was deleted.
    pub async fn delete(&self, id: Uuid) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
