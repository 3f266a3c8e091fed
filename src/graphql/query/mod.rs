//! GraphQL queries for Quill
//!
//! This module contains all query resolvers, organized by domain.

mod membership_tier;
mod post;
mod profile;
mod user;

pub use membership_tier::MembershipTierQuery;
pub use post::PostQuery;
pub use profile::ProfileQuery;
pub use user::UserQuery;

use async_graphql::MergedObject;

/// Root query type combining all query domains
#[derive(MergedObject, Default)]
pub struct Query(UserQuery, ProfileQuery, PostQuery, MembershipTierQuery);
