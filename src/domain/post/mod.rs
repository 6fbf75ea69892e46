//! Post aggregate

pub mod model;
pub mod repository;

mod dto;

pub use dto::{CreatePostDto, UpdatePostDto};
pub use model::Post;
pub use repository::PostRepositoryInterface;
