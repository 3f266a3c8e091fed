//! Membership tier GraphQL type

use async_graphql::{Enum, Object};

use crate::models::MembershipTier as DbMembershipTier;

/// Membership tier identifier exposed as a closed enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Enum)]
pub enum MembershipTierId {
    Basic,
    Business,
}

impl MembershipTierId {
    /// The text code stored in the database.
    pub fn as_db_id(self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Business => "BUSINESS",
        }
    }

    pub fn from_db_id(id: &str) -> Option<Self> {
        match id {
            "BASIC" => Some(Self::Basic),
            "BUSINESS" => Some(Self::Business),
            _ => None,
        }
    }
}

/// Membership tier exposed via GraphQL
pub struct MembershipTier {
    inner: DbMembershipTier,
}

impl From<DbMembershipTier> for MembershipTier {
    fn from(tier: DbMembershipTier) -> Self {
        Self { inner: tier }
    }
}

#[Object]
impl MembershipTier {
    /// Tier identifier
    async fn id(&self) -> async_graphql::Result<MembershipTierId> {
        MembershipTierId::from_db_id(&self.inner.id)
            .ok_or_else(|| format!("unknown membership tier id {:?}", self.inner.id).into())
    }

    /// Discount applied to this tier's members
    async fn discount(&self) -> f64 {
        self.inner.discount
    }

    /// How many posts a member may publish per month
    async fn post_limit_per_month(&self) -> i32 {
        self.inner.post_limit_per_month
    }
}
