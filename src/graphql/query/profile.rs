//! Profile queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::context::RequestContext;
use crate::graphql::types::Profile;
use crate::repositories::ProfileRepository;

/// Profile-related queries
#[derive(Default)]
pub struct ProfileQuery;

#[Object]
impl ProfileQuery {
    /// List every profile, priming the profile loader (keyed by owning user)
    /// so `User.profile` resolvers later in the query hit the cache.
    async fn profiles(&self, ctx: &Context<'_>) -> Result<Vec<Profile>> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<ProfileRepository>()?;

        let profiles = repo.list().await?;
        for profile in &profiles {
            cx.loaders.profile_by_user.prime(profile.user_id, profile.clone());
        }

        Ok(profiles.into_iter().map(Profile::from).collect())
    }

    /// Fetch one profile by its own id
    async fn profile(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Profile>> {
        let repo = ctx.data::<ProfileRepository>()?;
        let profile = repo.find_by_id(id).await?;
        Ok(profile.map(Profile::from))
    }
}
