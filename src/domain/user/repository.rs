use async_trait::async_trait;

use super::{CreateUserDto, User};
use crate::domain::DomainResult;
use crate::shared::{Page, PaginationRequest};

#[async_trait]
pub trait UserRepositoryInterface: Send + Sync {
    /// Fails with `Conflict` when the nickname or email is taken.
    async fn create_user(&self, dto: CreateUserDto) -> DomainResult<User>;

    async fn list_users(&self, request: &PaginationRequest) -> DomainResult<Page<User>>;
    async fn get_user_by_id(&self, id: i32) -> DomainResult<Option<User>>;
}
