//! Post queries

use std::collections::HashMap;

use async_graphql::{Context, Object, Result};
use uuid::Uuid;

use crate::graphql::context::RequestContext;
use crate::graphql::types::Post;
use crate::repositories::PostRepository;

/// Post-related queries
#[derive(Default)]
pub struct PostQuery;

#[Object]
impl PostQuery {
    /// List every post.
    ///
    /// The full listing is also a complete posts-per-author grouping, so it
    /// primes the posts-by-author loader: a `users { posts }` selection in
    /// the same request resolves from cache.
    async fn posts(&self, ctx: &Context<'_>) -> Result<Vec<Post>> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<PostRepository>()?;

        let posts = repo.list().await?;

        let mut by_author: HashMap<Uuid, Vec<crate::models::Post>> = HashMap::new();
        for post in &posts {
            by_author.entry(post.author_id).or_default().push(post.clone());
        }
        for (author_id, author_posts) in by_author {
            cx.loaders.posts_by_author.prime(author_id, author_posts);
        }

        Ok(posts.into_iter().map(Post::from).collect())
    }

    /// Fetch one post by id
    async fn post(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<Post>> {
        let repo = ctx.data::<PostRepository>()?;
        let post = repo.find_by_id(id).await?;
        Ok(post.map(Post::from))
    }
}
