//! Membership tier queries

use async_graphql::{Context, Object, Result};

use crate::graphql::context::RequestContext;
use crate::graphql::types::{MembershipTier, MembershipTierId};
use crate::repositories::MembershipTierRepository;

/// Membership tier queries
#[derive(Default)]
pub struct MembershipTierQuery;

#[Object]
impl MembershipTierQuery {
    /// List every membership tier, priming the tier loader so
    /// `Profile.membershipTier` resolvers in the same request hit the cache.
    async fn membership_tiers(&self, ctx: &Context<'_>) -> Result<Vec<MembershipTier>> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<MembershipTierRepository>()?;

        let tiers = repo.list().await?;
        for tier in &tiers {
            cx.loaders.membership_tier.prime(tier.id.clone(), tier.clone());
        }

        Ok(tiers.into_iter().map(MembershipTier::from).collect())
    }

    /// Fetch one membership tier by id
    async fn membership_tier(
        &self,
        ctx: &Context<'_>,
        id: MembershipTierId,
    ) -> Result<Option<MembershipTier>> {
        let cx = ctx.data::<RequestContext>()?;
        let tier = cx
            .loaders
            .membership_tier
            .load(id.as_db_id().to_string())
            .await?;
        Ok(tier.map(MembershipTier::from))
    }
}
