use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    Set, TransactionTrait,
};
use tracing::debug;

use crate::domain::{
    Comment, CommentRepositoryInterface, CreateCommentDto, DomainError, DomainResult,
    UpdateCommentDto,
};
use crate::infrastructure::database::entities::{comment, post, user};
use crate::infrastructure::database::store::SeaOrmStore;
use crate::shared::pagination::Predicate;
use crate::shared::{Page, PaginationRequest, Paginator};

pub struct SeaOrmCommentRepository {
    db: DatabaseConnection,
    store: SeaOrmStore<comment::Entity>,
    paginator: Arc<Paginator>,
}

impl SeaOrmCommentRepository {
    pub fn new(db: DatabaseConnection, paginator: Arc<Paginator>) -> Self {
        Self {
            store: SeaOrmStore::new(db.clone()),
            db,
            paginator,
        }
    }

    async fn find_scoped<C: ConnectionTrait>(
        conn: &C,
        post_id: i32,
        id: i32,
    ) -> DomainResult<Option<comment::Model>> {
        Ok(comment::Entity::find_by_id(id)
            .filter(comment::Column::PostId.eq(post_id))
            .one(conn)
            .await?)
    }

    async fn ensure_post<C: ConnectionTrait>(conn: &C, post_id: i32) -> DomainResult<()> {
        match post::Entity::find_by_id(post_id).one(conn).await? {
            Some(_) => Ok(()),
            None => Err(DomainError::not_found("Post", post_id)),
        }
    }

    /// Shift a post's denormalised comment counter by `delta`.
    async fn adjust_comment_count<C: ConnectionTrait>(
        conn: &C,
        post_id: i32,
        delta: i32,
    ) -> DomainResult<()> {
        post::Entity::update_many()
            .col_expr(
                post::Column::CommentCount,
                Expr::col(post::Column::CommentCount).add(delta),
            )
            .filter(post::Column::Id.eq(post_id))
            .exec(conn)
            .await?;
        Ok(())
    }
}

fn comment_model_to_domain(model: comment::Model) -> Comment {
    Comment {
        id: model.id,
        post_id: model.post_id,
        author_id: model.author_id,
        comment: model.comment,
        like_count: model.like_count,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

#[async_trait]
impl CommentRepositoryInterface for SeaOrmCommentRepository {
    async fn list_comments(
        &self,
        post_id: i32,
        request: &PaginationRequest,
    ) -> DomainResult<Page<Comment>> {
        Self::ensure_post(&self.db, post_id).await?;

        let scope = [Predicate::equals("postId", post_id)];
        let path = format!("posts/{}/comments", post_id);
        let page = self
            .paginator
            .paginate(request, &self.store, &scope, &path)
            .await?;
        Ok(page.map(comment_model_to_domain))
    }

    async fn get_comment(&self, post_id: i32, id: i32) -> DomainResult<Option<Comment>> {
        let model = Self::find_scoped(&self.db, post_id, id).await?;
        Ok(model.map(comment_model_to_domain))
    }

    async fn create_comment(&self, post_id: i32, dto: CreateCommentDto) -> DomainResult<Comment> {
        let txn = self.db.begin().await?;

        Self::ensure_post(&txn, post_id).await?;
        if user::Entity::find_by_id(dto.author_id).one(&txn).await?.is_none() {
            return Err(DomainError::not_found("User", dto.author_id));
        }

        let now = Utc::now();
        let model = comment::ActiveModel {
            post_id: Set(post_id),
            author_id: Set(dto.author_id),
            comment: Set(dto.comment),
            like_count: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await?;
        Self::adjust_comment_count(&txn, post_id, 1).await?;

        txn.commit().await?;
        debug!(post_id, comment_id = model.id, "Comment created");
        Ok(comment_model_to_domain(model))
    }

    async fn update_comment(
        &self,
        post_id: i32,
        id: i32,
        dto: UpdateCommentDto,
    ) -> DomainResult<Option<Comment>> {
        let Some(existing) = Self::find_scoped(&self.db, post_id, id).await? else {
            return Ok(None);
        };

        let mut active: comment::ActiveModel = existing.into();
        if let Some(text) = dto.comment {
            active.comment = Set(text);
        }
        active.updated_at = Set(Utc::now());

        let model = active.update(&self.db).await?;
        Ok(Some(comment_model_to_domain(model)))
    }

    async fn delete_comment(&self, post_id: i32, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await?;

        if Self::find_scoped(&txn, post_id, id).await?.is_none() {
            return Err(DomainError::not_found("Comment", id));
        }
        comment::Entity::delete_by_id(id).exec(&txn).await?;
        Self::adjust_comment_count(&txn, post_id, -1).await?;

        txn.commit().await?;
        debug!(post_id, comment_id = id, "Comment deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::{seed_posts, seed_user, setup_db};
    use crate::shared::pagination::PaginationConfig;

    struct Fixture {
        repo: SeaOrmCommentRepository,
        author_id: i32,
        post_ids: Vec<i32>,
    }

    async fn fixture() -> Fixture {
        let db = setup_db().await;
        let author = seed_user(&db, "reader").await;
        let posts = seed_posts(&db, author.id, &["first", "second"]).await;
        let paginator = Arc::new(Paginator::new(PaginationConfig::default()).unwrap());
        Fixture {
            repo: SeaOrmCommentRepository::new(db, paginator),
            author_id: author.id,
            post_ids: posts.iter().map(|p| p.id).collect(),
        }
    }

    async fn comment_count(fx: &Fixture, post_id: i32) -> i32 {
        post::Entity::find_by_id(post_id)
            .one(&fx.repo.db)
            .await
            .unwrap()
            .unwrap()
            .comment_count
    }

    fn new_comment(fx: &Fixture, text: &str) -> CreateCommentDto {
        CreateCommentDto {
            author_id: fx.author_id,
            comment: text.to_string(),
        }
    }

    #[tokio::test]
    async fn create_and_delete_keep_counter_in_step() {
        let fx = fixture().await;
        let post_id = fx.post_ids[0];

        let a = fx.repo.create_comment(post_id, new_comment(&fx, "a")).await.unwrap();
        fx.repo.create_comment(post_id, new_comment(&fx, "b")).await.unwrap();
        assert_eq!(comment_count(&fx, post_id).await, 2);

        fx.repo.delete_comment(post_id, a.id).await.unwrap();
        assert_eq!(comment_count(&fx, post_id).await, 1);
        assert_eq!(fx.repo.get_comment(post_id, a.id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn failed_create_leaves_post_untouched() {
        let fx = fixture().await;
        let post_id = fx.post_ids[0];

        let err = fx
            .repo
            .create_comment(
                post_id,
                CreateCommentDto {
                    author_id: 999,
                    comment: "ghost".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "User", .. }));
        assert_eq!(comment_count(&fx, post_id).await, 0);

        let err = fx
            .repo
            .create_comment(12345, new_comment(&fx, "orphan"))
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { entity: "Post", .. }));
    }

    #[tokio::test]
    async fn comments_are_scoped_to_their_post() {
        let fx = fixture().await;
        let (first, second) = (fx.post_ids[0], fx.post_ids[1]);
        let other = fx.repo.create_comment(second, new_comment(&fx, "elsewhere")).await.unwrap();
        for text in ["one", "two", "three"] {
            fx.repo.create_comment(first, new_comment(&fx, text)).await.unwrap();
        }

        assert_eq!(fx.repo.get_comment(first, other.id).await.unwrap(), None);
        assert!(matches!(
            fx.repo.delete_comment(first, other.id).await,
            Err(DomainError::NotFound { .. })
        ));

        let request = PaginationRequest::new().with("take", 2);
        let page = fx.repo.list_comments(first, &request).await.unwrap();
        assert_eq!(page.count, 2);
        assert!(page.data.iter().all(|c| c.post_id == first));
        let next = page.next.unwrap();
        assert!(
            next.starts_with(&format!("http://localhost:3000/posts/{}/comments?", first)),
            "{}",
            next
        );

        let rest = PaginationRequest::new()
            .with("take", 2)
            .with("where__id__more_than", page.cursor.after.unwrap());
        let page = fx.repo.list_comments(first, &rest).await.unwrap();
        assert_eq!(page.count, 1);
        assert_eq!(page.data[0].comment, "three");
        assert_eq!(page.next, None);
    }

    #[tokio::test]
    async fn update_changes_text_only() {
        let fx = fixture().await;
        let post_id = fx.post_ids[0];
        let created = fx.repo.create_comment(post_id, new_comment(&fx, "typo")).await.unwrap();

        let updated = fx
            .repo
            .update_comment(
                post_id,
                created.id,
                UpdateCommentDto {
                    comment: Some("fixed".into()),
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.comment, "fixed");
        assert_eq!(updated.author_id, created.author_id);
        assert_eq!(
            fx.repo
                .update_comment(post_id, 999, UpdateCommentDto::default())
                .await
                .unwrap(),
            None
        );
    }
}
