//! Subscription mutations
//!
//! Subscribing touches three cached shapes: both users' denormalized edge
//! lists and the subscriber's followed-author list, so all three loader
//! entries are invalidated after the write.

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::error::ApiError;
use crate::graphql::context::RequestContext;
use crate::graphql::types::User;
use crate::repositories::SubscriptionRepository;

/// Subscription edge mutations
#[derive(Default)]
pub struct SubscriptionMutation;

impl SubscriptionMutation {
    fn invalidate(cx: &RequestContext, subscriber_id: Uuid, author_id: Uuid) {
        cx.loaders.user.clear(&subscriber_id);
        cx.loaders.user.clear(&author_id);
        cx.loaders.subscriptions_by_subscriber.clear(&subscriber_id);
    }
}

#[Object]
impl SubscriptionMutation {
    /// Subscribe `userId` to `authorId`, returning the subscriber with its
    /// refreshed subscription lists
    async fn subscribe_to(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<User> {
        if user_id == author_id {
            return Err(ApiError::Validation(
                "a user cannot subscribe to themselves".to_string(),
            )
            .into());
        }

        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<SubscriptionRepository>()?;

        repo.subscribe(user_id, author_id)
            .await
            .map_err(ApiError::Database)?;
        Self::invalidate(cx, user_id, author_id);

        let subscriber =
            cx.loaders.user.load(user_id).await?.ok_or_else(|| ApiError::NotFound {
                resource_type: "user",
                id: user_id.to_string(),
            })?;
        Ok(User::from(subscriber))
    }

    /// Remove the `userId` → `authorId` subscription; returns whether an
    /// edge existed
    async fn unsubscribe_from(
        &self,
        ctx: &Context<'_>,
        user_id: Uuid,
        author_id: Uuid,
    ) -> Result<bool> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<SubscriptionRepository>()?;

        let removed = repo
            .unsubscribe(user_id, author_id)
            .await
            .map_err(ApiError::Database)?;
        if removed {
            Self::invalidate(cx, user_id, author_id);
        }
        Ok(removed)
    }
}
