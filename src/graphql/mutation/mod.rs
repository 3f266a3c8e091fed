//! GraphQL mutations for Quill
//!
//! This module contains all mutation resolvers, organized by domain. Every
//! mutation that changes a record clears the owning loader entry for the
//! affected key(s) after the write commits, so a re-read later in the same
//! request observes the change instead of a stale cache hit. Cross-request
//! staleness is out of scope for the loader layer.

mod post;
mod profile;
mod subscription;
mod user;

pub use post::PostMutation;
pub use profile::ProfileMutation;
pub use subscription::SubscriptionMutation;
pub use user::UserMutation;

use async_graphql::MergedObject;

/// Root mutation type combining all mutation domains
#[derive(MergedObject, Default)]
pub struct Mutation(UserMutation, ProfileMutation, PostMutation, SubscriptionMutation);
