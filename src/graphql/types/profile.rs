//! Profile GraphQL type

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::ApiError;
use crate::graphql::context::RequestContext;
use crate::models::Profile as DbProfile;

use super::membership_tier::{MembershipTier, MembershipTierId};

/// Profile exposed via GraphQL
pub struct Profile {
    inner: DbProfile,
}

impl From<DbProfile> for Profile {
    fn from(profile: DbProfile) -> Self {
        Self { inner: profile }
    }
}

#[Object]
impl Profile {
    /// Unique profile identifier
    async fn id(&self) -> Uuid {
        self.inner.id
    }

    async fn is_male(&self) -> bool {
        self.inner.is_male
    }

    async fn year_of_birth(&self) -> i32 {
        self.inner.year_of_birth
    }

    /// Id of the owning user
    async fn user_id(&self) -> Uuid {
        self.inner.user_id
    }

    /// Identifier of the profile's membership tier
    async fn membership_tier_id(&self) -> Result<MembershipTierId> {
        MembershipTierId::from_db_id(&self.inner.membership_tier_id).ok_or_else(|| {
            format!(
                "unknown membership tier id {:?}",
                self.inner.membership_tier_id
            )
            .into()
        })
    }

    /// The profile's membership tier (batched through the tier loader)
    async fn membership_tier(&self, ctx: &Context<'_>) -> Result<MembershipTier> {
        let cx = ctx.data::<RequestContext>()?;
        let tier = cx
            .loaders
            .membership_tier
            .load(self.inner.membership_tier_id.clone())
            .await?
            .ok_or_else(|| ApiError::NotFound {
                resource_type: "membership tier",
                id: self.inner.membership_tier_id.clone(),
            })?;
        Ok(MembershipTier::from(tier))
    }
}
