//! Comment aggregate
//!
//! Comments always belong to a post; listing is scoped to that post.

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreateCommentDto, UpdateCommentDto};
pub use model::Comment;
pub use repository::CommentRepositoryInterface;
