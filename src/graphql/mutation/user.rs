//! User mutations

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::error::ApiError;
use crate::graphql::context::RequestContext;
use crate::graphql::types::User;
use crate::models::UserWithSubscriptions;
use crate::repositories::UserRepository;

/// Input for creating a user
#[derive(Debug, InputObject)]
pub struct CreateUserInput {
    pub name: String,
    pub balance: f64,
}

/// Input for updating a user; omitted fields are left unchanged
#[derive(Debug, InputObject)]
pub struct ChangeUserInput {
    pub name: Option<String>,
    pub balance: Option<f64>,
}

/// User-related mutations
#[derive(Default)]
pub struct UserMutation;

#[Object]
impl UserMutation {
    /// Create a user
    async fn create_user(&self, ctx: &Context<'_>, dto: CreateUserInput) -> Result<User> {
        let repo = ctx.data::<UserRepository>()?;
        let user = repo
            .create(&dto.name, dto.balance)
            .await
            .map_err(ApiError::Database)?;
        Ok(User::from(UserWithSubscriptions::without_edges(user)))
    }

    /// Update a user, invalidating its loader entry so re-reads in this
    /// request see the new values
    async fn change_user(
        &self,
        ctx: &Context<'_>,
        id: Uuid,
        dto: ChangeUserInput,
    ) -> Result<User> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<UserRepository>()?;

        let user = repo
            .update(id, dto.name.as_deref(), dto.balance)
            .await
            .map_err(ApiError::Database)?
            .ok_or_else(|| ApiError::NotFound {
                resource_type: "user",
                id: id.to_string(),
            })?;
        cx.loaders.user.clear(&id);

        // The edge lists are unaffected by a field update; reload them
        // through the loader for the returned payload.
        let reloaded = cx.loaders.user.load(id).await?;
        Ok(User::from(
            reloaded.unwrap_or_else(|| UserWithSubscriptions::without_edges(user)),
        ))
    }

    /// Delete a user (profile, posts, and subscription edges cascade),
    /// invalidating every loader entry the deletion touches
    async fn delete_user(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<UserRepository>()?;

        let deleted = repo.delete(id).await.map_err(ApiError::Database)?;
        if deleted {
            cx.loaders.user.clear(&id);
            cx.loaders.profile_by_user.clear(&id);
            cx.loaders.posts_by_author.clear(&id);
            cx.loaders.subscriptions_by_subscriber.clear(&id);
        }
        Ok(deleted)
    }
}
