//! User models and the subscription edge table
//!
//! The subscription relation is a self-referential many-to-many between
//! users, stored as an edge table keyed by the ordered pair
//! (subscriber_id, author_id). Loaders resolve edges to user ids and ids to
//! users, so the cyclic relation never becomes a cyclic object graph.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// User account row
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub balance: f64,
}

/// One row of the subscription edge table: `subscriber` follows `author`.
/// Unique on the (subscriber_id, author_id) pair.
#[derive(Debug, Clone, FromRow)]
pub struct SubscriptionEdge {
    pub subscriber_id: Uuid,
    pub author_id: Uuid,
}

/// A user together with the denormalized id lists for both traversal
/// directions of the subscription relation. This is the value shape the user
/// loader yields: resolvers expand the ids back into users through the user
/// loader, one batch per level.
#[derive(Debug, Clone)]
pub struct UserWithSubscriptions {
    pub user: User,
    /// Authors this user follows (outgoing edges).
    pub subscribed_to_ids: Vec<Uuid>,
    /// Users following this user (incoming edges).
    pub subscriber_ids: Vec<Uuid>,
}

impl UserWithSubscriptions {
    /// Wrap a bare user row with no known edges (fresh accounts).
    pub fn without_edges(user: User) -> Self {
        Self {
            user,
            subscribed_to_ids: Vec::new(),
            subscriber_ids: Vec::new(),
        }
    }
}
