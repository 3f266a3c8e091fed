//! Profile repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Profile;

const PROFILE_COLUMNS: &str = "id, is_male, year_of_birth, user_id, membership_tier_id";

/// Repository for profile database operations
#[derive(Clone)]
pub struct ProfileRepository {
    pool: PgPool,
}

impl ProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Profile>, sqlx::Error> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Profile>, sqlx::Error> {
        let sql = format!("SELECT {PROFILE_COLUMNS} FROM profiles WHERE id = $1");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    pub async fn create(
        &self,
        user_id: Uuid,
        is_male: bool,
        year_of_birth: i32,
        membership_tier_id: &str,
    ) -> Result<Profile, sqlx::Error> {
        let sql = format!(
            "INSERT INTO profiles (id, is_male, year_of_birth, user_id, membership_tier_id) \
             VALUES (gen_random_uuid(), $2, $3, $1, $4) RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(user_id)
            .bind(is_male)
            .bind(year_of_birth)
            .bind(membership_tier_id)
            .fetch_one(&self.pool)
            .await
    }

    /// Update the provided fields; returns `None` when the profile does not
    /// exist.
    pub async fn update(
        &self,
        id: Uuid,
        is_male: Option<bool>,
        year_of_birth: Option<i32>,
        membership_tier_id: Option<&str>,
    ) -> Result<Option<Profile>, sqlx::Error> {
        let sql = format!(
            "UPDATE profiles SET \
                 is_male = COALESCE($2, is_male), \
                 year_of_birth = COALESCE($3, year_of_birth), \
                 membership_tier_id = COALESCE($4, membership_tier_id) \
             WHERE id = $1 RETURNING {PROFILE_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(id)
            .bind(is_male)
            .bind(year_of_birth)
            .bind(membership_tier_id)
            .fetch_optional(&self.pool)
            .await
    }

    /// Delete a profile, returning the owning user id so the caller can
    /// invalidate the profile loader entry for that user.
    pub async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
        sqlx::query_scalar("DELETE FROM profiles WHERE id = $1 RETURNING user_id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }
}
