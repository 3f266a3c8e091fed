//! GraphQL object types for Quill
//!
//! Thin wrappers over the database models. Every relationship resolver goes
//! through the request's batch loaders, never straight to the pool, so
//! sibling resolutions coalesce into one bulk fetch per entity kind.

mod membership_tier;
mod post;
mod profile;
mod user;

pub use membership_tier::{MembershipTier, MembershipTierId};
pub use post::Post;
pub use profile::Profile;
pub use user::User;
