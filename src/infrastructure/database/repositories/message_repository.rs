use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::{
    CreateMessageDto, DomainError, DomainResult, Message, MessageRepositoryInterface,
};
use crate::infrastructure::database::entities::{message, user};
use crate::infrastructure::database::store::SeaOrmStore;
use crate::shared::pagination::Predicate;
use crate::shared::{Page, PaginationRequest, Paginator};

pub struct SeaOrmMessageRepository {
    db: DatabaseConnection,
    store: SeaOrmStore<message::Entity>,
    paginator: Arc<Paginator>,
}

impl SeaOrmMessageRepository {
    pub fn new(db: DatabaseConnection, paginator: Arc<Paginator>) -> Self {
        Self {
            store: SeaOrmStore::new(db.clone()),
            db,
            paginator,
        }
    }
}

fn message_model_to_domain(model: message::Model) -> Message {
    Message {
        id: model.id,
        chat_id: model.chat_id,
        author_id: model.author_id,
        message: model.message,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl MessageRepositoryInterface for SeaOrmMessageRepository {
    async fn list_messages(
        &self,
        chat_id: i32,
        request: &PaginationRequest,
    ) -> DomainResult<Page<Message>> {
        let scope = [Predicate::equals("chatId", chat_id)];
        let path = format!("chats/{}/messages", chat_id);
        let page = self
            .paginator
            .paginate(request, &self.store, &scope, &path)
            .await?;
        Ok(page.map(message_model_to_domain))
    }

    async fn create_message(&self, chat_id: i32, dto: CreateMessageDto) -> DomainResult<Message> {
        if user::Entity::find_by_id(dto.author_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("User", dto.author_id));
        }

        let now = Utc::now();
        let model = message::ActiveModel {
            chat_id: Set(chat_id),
            author_id: Set(dto.author_id),
            message: Set(dto.message),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(message_model_to_domain(model))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::{seed_user, setup_db};
    use crate::shared::pagination::PaginationConfig;

    #[tokio::test]
    async fn messages_page_newest_first_within_a_chat() {
        let db = setup_db().await;
        let author = seed_user(&db, "chatter").await;
        let paginator = Arc::new(Paginator::new(PaginationConfig::default()).unwrap());
        let repo = SeaOrmMessageRepository::new(db, paginator);

        for (chat_id, text) in [(1, "hi"), (2, "elsewhere"), (1, "how are you"), (1, "bye")] {
            repo.create_message(
                chat_id,
                CreateMessageDto {
                    author_id: author.id,
                    message: text.to_string(),
                },
            )
            .await
            .unwrap();
        }

        let request = PaginationRequest::new()
            .with("take", 2)
            .with("order__id", "DESC");
        let page = repo.list_messages(1, &request).await.unwrap();
        assert_eq!(
            page.data.iter().map(|m| m.message.as_str()).collect::<Vec<_>>(),
            vec!["bye", "how are you"]
        );
        let next = page.next.unwrap();
        assert!(next.starts_with("http://localhost:3000/chats/1/messages?"), "{}", next);
        assert!(next.ends_with("where__id__less_than=3"), "{}", next);

        let older = PaginationRequest::new()
            .with("take", 2)
            .with("order__id", "DESC")
            .with("where__id__less_than", 3);
        let page = repo.list_messages(1, &older).await.unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.data[0].message, "hi");
    }

    #[tokio::test]
    async fn unknown_author_is_rejected() {
        let db = setup_db().await;
        let paginator = Arc::new(Paginator::new(PaginationConfig::default()).unwrap());
        let repo = SeaOrmMessageRepository::new(db, paginator);
        let err = repo
            .create_message(
                1,
                CreateMessageDto {
                    author_id: 7,
                    message: "?".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
    }
}
