//! Schema surface test: the built SDL exposes the domain types and the
//! loader-backed relationship fields.

mod common;

use quill_api::graphql::build_schema;

#[tokio::test]
async fn schema_exposes_the_domain_types() {
    let schema = build_schema(common::lazy_pool());

    let sdl = schema.sdl();
    for ty in ["type User", "type Profile", "type Post", "type MembershipTier"] {
        assert!(sdl.contains(ty), "missing {ty} in SDL");
    }
    assert!(sdl.contains("subscribedTo"));
    assert!(sdl.contains("subscribers"));
    assert!(sdl.contains("membershipTier"));
}
