//! Membership tier repository
//!
//! Tiers are seeded by migration and read-only through the API, so this
//! repository only lists; point lookups go through the tier loader.

use sqlx::PgPool;

use crate::models::MembershipTier;

/// Repository for membership tier database operations
#[derive(Clone)]
pub struct MembershipTierRepository {
    pool: PgPool,
}

impl MembershipTierRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<MembershipTier>, sqlx::Error> {
        sqlx::query_as("SELECT id, discount, post_limit_per_month FROM membership_tiers")
            .fetch_all(&self.pool)
            .await
    }
}
