//! Membership tier model

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Membership tier row. The id is a short text code ("BASIC", "BUSINESS")
/// rather than a UUID; the GraphQL layer exposes it as an enum.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct MembershipTier {
    pub id: String,
    pub discount: f64,
    pub post_limit_per_month: i32,
}
