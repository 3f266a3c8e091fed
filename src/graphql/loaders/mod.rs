//! Bulk-fetch implementations for the request-scoped batch loaders
//!
//! One fetcher per entity kind, each turning a deduplicated key set into a
//! single set of SQL statements. Two shapes exist:
//! - Single-entity fetchers keyed by the entity's own id (users, tiers),
//!   where a missing key resolves as absent.
//! - Relation fetchers keyed by a foreign key (posts by author, profile by
//!   user, subscriptions by subscriber), keyed that way because the common
//!   access pattern is "given a user, get their posts/profile/subscriptions"
//!   and a foreign-key batch needs no join step in the resolver.

mod membership_tier;
mod posts_by_author;
mod profile_by_user;
mod subscriptions_by_subscriber;
mod user;

pub use membership_tier::MembershipTierLoader;
pub use posts_by_author::PostsByAuthorLoader;
pub use profile_by_user::ProfileByUserLoader;
pub use subscriptions_by_subscriber::SubscriptionsBySubscriberLoader;
pub use user::UserLoader;
