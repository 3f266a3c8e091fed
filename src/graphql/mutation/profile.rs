//! Profile mutations

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::error::ApiError;
use crate::graphql::context::RequestContext;
use crate::graphql::types::{MembershipTierId, Profile};
use crate::repositories::ProfileRepository;

/// Input for creating a profile
#[derive(Debug, InputObject)]
pub struct CreateProfileInput {
    pub user_id: Uuid,
    pub is_male: bool,
    pub year_of_birth: i32,
    pub membership_tier_id: MembershipTierId,
}

/// Input for updating a profile; omitted fields are left unchanged
#[derive(Debug, InputObject)]
pub struct ChangeProfileInput {
    pub is_male: Option<bool>,
    pub year_of_birth: Option<i32>,
    pub membership_tier_id: Option<MembershipTierId>,
}

/// Profile-related mutations
#[derive(Default)]
pub struct ProfileMutation;

#[Object]
impl ProfileMutation {
    /// Create a profile for a user.
    ///
    /// Clears the profile loader entry for that user: an earlier resolution
    /// in this request may have cached "no profile" for them.
    async fn create_profile(&self, ctx: &Context<'_>, dto: CreateProfileInput) -> Result<Profile> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<ProfileRepository>()?;

        let profile = repo
            .create(
                dto.user_id,
                dto.is_male,
                dto.year_of_birth,
                dto.membership_tier_id.as_db_id(),
            )
            .await
            .map_err(ApiError::Database)?;
        cx.loaders.profile_by_user.clear(&dto.user_id);

        Ok(Profile::from(profile))
    }

    /// Update a profile, invalidating the owning user's loader entry
    async fn change_profile(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeProfileInput,
    ) -> Result<Profile> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<ProfileRepository>()?;

        let profile = repo
            .update(
                id,
                dto.is_male,
                dto.year_of_birth,
                dto.membership_tier_id.map(MembershipTierId::as_db_id),
            )
            .await
            .map_err(ApiError::Database)?
            .ok_or_else(|| ApiError::NotFound {
                resource_type: "profile",
                id: id.to_string(),
            })?;
        cx.loaders.profile_by_user.clear(&profile.user_id);

        Ok(Profile::from(profile))
    }

    /// Delete a profile, invalidating the owning user's loader entry
    async fn delete_profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<ProfileRepository>()?;

        match repo.delete(id).await.map_err(ApiError::Database)? {
            Some(user_id) => {
                cx.loaders.profile_by_user.clear(&user_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
