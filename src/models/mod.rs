//! Database models for Quill
//!
//! SQLx row types for the relational domain: users, profiles, posts,
//! membership tiers, and the user-to-user subscription edge table.

pub mod membership_tier;
pub mod post;
pub mod profile;
pub mod user;

pub use membership_tier::MembershipTier;
pub use post::Post;
pub use profile::Profile;
pub use user::{SubscriptionEdge, User, UserWithSubscriptions};
