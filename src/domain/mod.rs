//! Domain layer: aggregates, their DTOs and repository interfaces.

pub mod comment;
pub mod error;
pub mod message;
pub mod post;
pub mod user;

pub use comment::{Comment, CommentRepositoryInterface, CreateCommentDto, UpdateCommentDto};
pub use error::{DomainError, DomainResult};
pub use message::{CreateMessageDto, Message, MessageRepositoryInterface};
pub use post::{CreatePostDto, Post, PostRepositoryInterface, UpdatePostDto};
pub use user::{CreateUserDto, User, UserRepositoryInterface, UserRole};
