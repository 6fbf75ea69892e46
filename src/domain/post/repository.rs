use async_trait::async_trait;

use super::{CreatePostDto, Post, UpdatePostDto};
use crate::domain::DomainResult;
use crate::shared::{Page, PaginationRequest};

#[async_trait]
pub trait PostRepositoryInterface: Send + Sync {
    async fn list_posts(&self, request: &PaginationRequest) -> DomainResult<Page<Post>>;
    async fn get_post(&self, id: i32) -> DomainResult<Option<Post>>;

    async fn create_post(&self, dto: CreatePostDto) -> DomainResult<Post>;
    async fn update_post(&self, id: i32, dto: UpdatePostDto) -> DomainResult<Option<Post>>;
    async fn delete_post(&self, id: i32) -> DomainResult<()>;
}
