use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::domain::{
    CreatePostDto, DomainError, DomainResult, Post, PostRepositoryInterface, UpdatePostDto,
};
use crate::infrastructure::database::entities::{post, user};
use crate::infrastructure::database::store::SeaOrmStore;
use crate::shared::{Page, PaginationRequest, Paginator};

pub struct SeaOrmPostRepository {
    db: DatabaseConnection,
    store: SeaOrmStore<post::Entity>,
    paginator: Arc<Paginator>,
}

impl SeaOrmPostRepository {
    pub fn new(db: DatabaseConnection, paginator: Arc<Paginator>) -> Self {
        Self {
            store: SeaOrmStore::new(db.clone()),
            db,
            paginator,
        }
    }
}

fn post_model_to_domain(model: post::Model) -> Post {
    Post {
        id: model.id,
        author_id: model.author_id,
        title: model.title,
        content: model.content,
        like_count: model.like_count,
        comment_count: model.comment_count,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl PostRepositoryInterface for SeaOrmPostRepository {
    async fn list_posts(&self, request: &PaginationRequest) -> DomainResult<Page<Post>> {
        let page = self
            .paginator
            .paginate(request, &self.store, &[], "posts")
            .await?;
        Ok(page.map(post_model_to_domain))
    }

    async fn get_post(&self, id: i32) -> DomainResult<Option<Post>> {
        let model = post::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(post_model_to_domain))
    }

    async fn create_post(&self, dto: CreatePostDto) -> DomainResult<Post> {
        if user::Entity::find_by_id(dto.author_id)
            .one(&self.db)
            .await?
            .is_none()
        {
            return Err(DomainError::not_found("User", dto.author_id));
        }

        let now = Utc::now();
        let model = post::ActiveModel {
            author_id: Set(dto.author_id),
            title: Set(dto.title),
            content: Set(dto.content),
            like_count: Set(0),
            comment_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&self.db)
        .await?;

        Ok(post_model_to_domain(model))
    }

    async fn update_post(&self, id: i32, dto: UpdatePostDto) -> DomainResult<Option<Post>> {
        let Some(existing) = post::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };

        let mut active: post::ActiveModel = existing.into();
        if let Some(title) = dto.title {
            active.title = Set(title);
        }
        if let Some(content) = dto.content {
            active.content = Set(content);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Some(post_model_to_domain(model)))
    }

    async fn delete_post(&self, id: i32) -> DomainResult<()> {
        let result = post::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Post", id));
        }
        Ok(())
    }
}
