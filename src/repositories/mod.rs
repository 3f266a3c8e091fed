//! Database repository layer for Quill
//!
//! Centralizes all non-batched database operations into reusable
//! repositories, one per entity, so SQL stays in one place and resolvers
//! stay thin. Batched reads live in `graphql::loaders`; everything else
//! (listings, point lookups by primary key, writes) lives here.

pub mod membership_tier;
pub mod post;
pub mod profile;
pub mod subscription;
pub mod user;

pub use membership_tier::MembershipTierRepository;
pub use post::PostRepository;
pub use profile::ProfileRepository;
pub use subscription::SubscriptionRepository;
pub use user::UserRepository;
