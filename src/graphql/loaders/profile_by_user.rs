//! Profile-by-user bulk fetcher
//!
//! Keyed by the owning user id; a user without a profile resolves as absent.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::graphql::batch::BatchFetch;
use crate::models::Profile;

/// Bulk fetcher for profiles keyed by owning user
#[derive(Clone)]
pub struct ProfileByUserLoader {
    pool: PgPool,
}

impl ProfileByUserLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BatchFetch for ProfileByUserLoader {
    type Key = Uuid;
    type Value = Profile;
    type Error = Arc<sqlx::Error>;

    async fn fetch(
        &self,
        keys: &[Uuid],
    ) -> Result<HashMap<Uuid, Profile>, Arc<sqlx::Error>> {
        let profiles: Vec<Profile> = sqlx::query_as(
            "SELECT id, is_male, year_of_birth, user_id, membership_tier_id \
             FROM profiles WHERE user_id = ANY($1)",
        )
        .bind(keys)
        .fetch_all(&self.pool)
        .await
        .map_err(Arc::new)?;

        Ok(profiles
            .into_iter()
            .map(|profile| (profile.user_id, profile))
            .collect())
    }
}
