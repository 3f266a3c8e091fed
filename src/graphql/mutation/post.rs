//! Post mutations

use async_graphql::{Context, InputObject, Object, Result};
use uuid::Uuid;

use crate::error::ApiError;
use crate::graphql::context::RequestContext;
use crate::graphql::types::Post;
use crate::repositories::PostRepository;

/// Input for creating a post
#[derive(Debug, InputObject)]
pub struct CreatePostInput {
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
}

/// Input for updating a post; omitted fields are left unchanged
#[derive(Debug, InputObject)]
pub struct ChangePostInput {
    pub title: Option<String>,
    pub content: Option<String>,
}

/// Post-related mutations
#[derive(Default)]
pub struct PostMutation;

#[Object]
impl PostMutation {
    /// Create a post, invalidating the author's posts loader entry
    async fn create_post(&self, ctx: &Context<'_>, dto: CreatePostInput) -> Result<Post> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<PostRepository>()?;

        let post = repo
            .create(dto.author_id, &dto.title, &dto.content)
            .await
            .map_err(ApiError::Database)?;
        cx.loaders.posts_by_author.clear(&dto.author_id);

        Ok(Post::from(post))
    }

    /// Update a post, invalidating the author's posts loader entry
    async fn change_post(&self, ctx: &Context<'_>, id: Uuid, dto: ChangePostInput) -> Result<Post> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<PostRepository>()?;

        let post = repo
            .update(id, dto.title.as_deref(), dto.content.as_deref())
            .await
            .map_err(ApiError::Database)?
            .ok_or_else(|| ApiError::NotFound {
                resource_type: "post",
                id: id.to_string(),
            })?;
        cx.loaders.posts_by_author.clear(&post.author_id);

        Ok(Post::from(post))
    }

    /// Delete a post, invalidating the author's posts loader entry
    async fn delete_post(&self, ctx: &Context<'_>, id: Uuid) -> Result<bool> {
        let cx = ctx.data::<RequestContext>()?;
        let repo = ctx.data::<PostRepository>()?;

        match repo.delete(id).await.map_err(ApiError::Database)? {
            Some(author_id) => {
                cx.loaders.posts_by_author.clear(&author_id);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
