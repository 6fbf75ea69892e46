use async_trait::async_trait;

use super::{Comment, CreateCommentDto, UpdateCommentDto};
use crate::domain::DomainResult;
use crate::shared::{Page, PaginationRequest};

#[async_trait]
pub trait CommentRepositoryInterface: Send + Sync {
    async fn list_comments(
        &self,
        post_id: i32,
        request: &PaginationRequest,
    ) -> DomainResult<Page<Comment>>;
    async fn get_comment(&self, post_id: i32, id: i32) -> DomainResult<Option<Comment>>;

    /// Fails with `NotFound` when the post does not exist.
    async fn create_comment(&self, post_id: i32, dto: CreateCommentDto) -> DomainResult<Comment>;
    async fn update_comment(
        &self,
        post_id: i32,
        id: i32,
        dto: UpdateCommentDto,
    ) -> DomainResult<Option<Comment>>;
    async fn delete_comment(&self, post_id: i32, id: i32) -> DomainResult<()>;
}
