//! Wires the SeaORM repositories behind their domain interfaces.

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::domain::{
    CommentRepositoryInterface, MessageRepositoryInterface, PostRepositoryInterface,
    UserRepositoryInterface,
};
use crate::infrastructure::crypto::PasswordHasher;
use crate::shared::Paginator;

use super::comment_repository::SeaOrmCommentRepository;
use super::message_repository::SeaOrmMessageRepository;
use super::post_repository::SeaOrmPostRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and a shared paginator; every accessor hands
/// out a cheaply clonable trait object.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone(), paginator, PasswordHasher::default());
/// let page = repos.posts().list_posts(&request).await?;
/// ```
#[derive(Clone)]
pub struct SeaOrmRepositoryProvider {
    posts: Arc<dyn PostRepositoryInterface>,
    comments: Arc<dyn CommentRepositoryInterface>,
    users: Arc<dyn UserRepositoryInterface>,
    messages: Arc<dyn MessageRepositoryInterface>,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection, paginator: Arc<Paginator>, hasher: PasswordHasher) -> Self {
        Self {
            posts: Arc::new(SeaOrmPostRepository::new(db.clone(), paginator.clone())),
            comments: Arc::new(SeaOrmCommentRepository::new(db.clone(), paginator.clone())),
            users: Arc::new(SeaOrmUserRepository::new(db.clone(), paginator.clone(), hasher)),
            messages: Arc::new(SeaOrmMessageRepository::new(db, paginator)),
        }
    }

    pub fn posts(&self) -> Arc<dyn PostRepositoryInterface> {
        self.posts.clone()
    }

    pub fn comments(&self) -> Arc<dyn CommentRepositoryInterface> {
        self.comments.clone()
    }

    pub fn users(&self) -> Arc<dyn UserRepositoryInterface> {
        self.users.clone()
    }

    pub fn messages(&self) -> Arc<dyn MessageRepositoryInterface> {
        self.messages.clone()
    }
}
