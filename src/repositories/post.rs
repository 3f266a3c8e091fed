//! Post repository

use sqlx::PgPool;
use uuid::Uuid;

use crate::models::Post;

const POST_COLUMNS: &str = "id, title, content, author_id";

/// Repository for post database operations
#[derive(Clone)]
pub struct PostRepository {
    pool: PgPool,
}

impl PostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> Result<Vec<Post>, sqlx::Error> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts");
        sqlx::query_as(&sql).fetch_all(&self.pool).await
    }

    pub async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, sqlx::Error> {
        let sql = format!("SELECT {POST_COLUMNS} FROM posts WHERE id = $1");
        sqlx::query_as(&sql).bind(id).fetch_optional(&self.pool).await
    }

    pub async fn create(
        &self,
        author_id: Uuid,
        title: &str,
        content: &str,
    ) -> Result<Post, sqlx::Error> {
        let sql = format!(
            "INSERT INTO posts (id, title, content, author_id) \
             VALUES (gen_random_uuid(), $2, $3, $1) RETURNING {POST_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(author_id)
            .bind(title)
            .bind(content)
            .fetch_one(&self.pool)
            .await
    }

    /// Update the provided fields; returns `None` when the post does not
    /// exist.
    pub async fn update(
        &self,
        id: Uuid,
        title: Option<&str>,
        content: Option<&str>,
    ) -> Result<Option<Post>, sqlx::Error> {
        let sql = format!(
            "UPDATE posts SET title = COALESCE($2, title), content = COALESCE($3, content) \
             WHERE id = $1 RETURNING {POST_COLUMNS}"
        );
        sqlx::query_as(&sql)
            .bind(id)
            .bind(title)
            .bind(content)
            .fetch_optional(&self.pool)
            .await
    }

    /// Delete a post, returning its author id so the caller can invalidate
    /// the posts-by-author loader entry.
    pub async fn delete(&self, id: Uuid) -> Result<Option<Uuid>, sqlx::Error> {
        sqlx::query_scalar("DELETE FROM posts WHERE id = $1 RETURNING author_id")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }
}
