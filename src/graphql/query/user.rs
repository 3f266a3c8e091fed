//! User queries

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::context::RequestContext;
use crate::graphql::types::User;
use crate::repositories::UserRepository;

/// User-related queries
#[derive(Default)]
pub struct UserQuery;

#[Object]
impl UserQuery {
    /// List every user.
    ///
    /// The listing already carries each user's subscription edges, so every
    /// row is primed into the user loader: descendant `subscribedTo` /
    /// `subscribers` resolvers hit the cache instead of refetching user by
    /// user.
    async fn users(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<UserRepository>()?;

        let users = repo.list_with_subscriptions().await?;
        for user in &users {
            cx.loaders.user.prime(user.user.id, user.clone());
        }

        Ok(users.into_iter().map(User::from).collect())
    }

    /// Fetch one user by id
    async fn user(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<User>> {
        let cx = ctx.data::<RequestContext>()?;
        let user = cx.loaders.user.load(id).await?;
        Ok(user.map(User::from))
    }
}
