//! Membership tier bulk fetcher

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;

use crate::graphql::batch::BatchFetch;
use crate::models::MembershipTier;

/// Bulk fetcher for membership tiers by id
#[derive(Clone)]
pub struct MembershipTierLoader {
    pool: PgPool,
}

impl MembershipTierLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BatchFetch for MembershipTierLoader {
    type Key = String;
    type Value = MembershipTier;
    type Error = Arc<sqlx::Error>;

    async fn fetch(
        &self,
        keys: &[String],
    ) -> Result<HashMap<String, MembershipTier>, Arc<sqlx::Error>> {
        let tiers: Vec<MembershipTier> = sqlx::query_as(
            "SELECT id, discount, post_limit_per_month FROM membership_tiers WHERE id = ANY($1)",
        )
        .bind(keys)
        .fetch_all(&self.pool)
        .await
        .map_err(Arc::new)?;

        Ok(tiers.into_iter().map(|tier| (tier.id.clone(), tier)).collect())
    }
}
