//! Posts-by-author bulk fetcher
//!
//! Keyed by author id, not post id: one batch returns every requested
//! author's posts. Authors with no posts get an empty vec, not an absence.

use std::collections::HashMap;
use std::sync::Arc;

use sqlx::PgPool;
use uuid::Uuid;

use crate::graphql::batch::BatchFetch;
use crate::models::Post;

/// Bulk fetcher for posts grouped by author
#[derive(Clone)]
pub struct PostsByAuthorLoader {
    pool: PgPool,
}

impl PostsByAuthorLoader {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

impl BatchFetch for PostsByAuthorLoader {
    type Key = Uuid;
    type Value = Vec<Post>;
    type Error = Arc<sqlx::Error>;

    async fn fetch(
        &self,
        keys: &[Uuid],
    ) -> Result<HashMap<Uuid, Vec<Post>>, Arc<sqlx::Error>> {
        let posts: Vec<Post> = sqlx::query_as(
            "SELECT id, title, content, author_id FROM posts WHERE author_id = ANY($1)",
        )
        .bind(keys)
        .fetch_all(&self.pool)
        .await
        .map_err(Arc::new)?;

        let mut result: HashMap<Uuid, Vec<Post>> = HashMap::new();
        for post in posts {
            result.entry(post.author_id).or_default().push(post);
        }

        // Ensure all requested keys have an entry (even if empty)
        for key in keys {
            result.entry(*key).or_default();
        }

        Ok(result)
    }
}
