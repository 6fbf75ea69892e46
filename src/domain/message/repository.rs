use async_trait::async_trait;

use super::{CreateMessageDto, Message};
use crate::domain::DomainResult;
use crate::shared::{Page, PaginationRequest};

#[async_trait]
pub trait MessageRepositoryInterface: Send + Sync {
    async fn list_messages(
        &self,
        chat_id: i32,
        request: &PaginationRequest,
    ) -> DomainResult<Page<Message>>;

    async fn create_message(&self, chat_id: i32, dto: CreateMessageDto) -> DomainResult<Message>;
}
