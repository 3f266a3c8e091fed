//! User GraphQL type
//!
//! Relationship resolvers all go through the request's loaders, so resolving
//! `profile` and `posts` for a page of users costs one bulk fetch per
//! relation, not one per user. The subscription relation resolves edge ids
//! first and then expands them through the user loader, which keeps the
//! cyclic user-to-user relation free of object cycles and batches every
//! nesting level.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::context::RequestContext;
use crate::models::UserWithSubscriptions;

use super::post::Post;
use super::profile::Profile;

/// User exposed via GraphQL
pub struct User {
    inner: UserWithSubscriptions,
}

impl From<UserWithSubscriptions> for User {
    fn from(user: UserWithSubscriptions) -> Self {
        Self { inner: user }
    }
}

#[Object]
impl User {
    /// Unique user identifier
    async fn id(&self) -> Uuid {
        self.inner.user.id
    }

    /// Display name
    async fn name(&self) -> &str {
        &self.inner.user.name
    }

    /// Account balance
    async fn balance(&self) -> f64 {
        self.inner.user.balance
    }

    /// The user's profile, if one exists (batched through the profile loader)
    async fn profile(&self, ctx: &Context<'_>) -> Result<Option<Profile>> {
        let cx = ctx.data::<RequestContext>()?;
        let profile = cx.loaders.profile_by_user.load(self.inner.user.id).await?;
        Ok(profile.map(Profile::from))
    }

    /// Posts authored by this user (batched through the posts loader)
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let cx = ctx.data::<RequestContext>()?;
        let posts = cx
            .loaders
            .posts_by_author
            .load(self.inner.user.id)
            .await?
            .unwrap_or_default();
        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// Authors this user is subscribed to
    async fn subscribed_to(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let cx = ctx.data::<RequestContext>()?;
        let author_ids = cx
            .loaders
            .subscriptions_by_subscriber
            .load(self.inner.user.id)
            .await?
            .unwrap_or_default();
        let authors = cx.loaders.user.load_many(author_ids).await?;
        Ok(authors.into_iter().flatten().map(User::from).collect())
    }

    /// Users subscribed to this user, expanded from the denormalized
    /// incoming-edge ids carried on the loaded value
    async fn subscribers(&self, ctx: &Context<'_>) -> Result<Vec<User>> {
        let cx = ctx.data::<RequestContext>()?;
        let subscribers = cx
            .loaders
            .user
            .load_many(self.inner.subscriber_ids.iter().copied())
            .await?;
        Ok(subscribers.into_iter().flatten().map(User::from).collect())
    }
}
