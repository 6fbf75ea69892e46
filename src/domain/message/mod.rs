//! Chat message aggregate

pub mod model;
pub mod repository;

mod dto;

pub use dto::CreateMessageDto;
pub use model::Message;
pub use repository::MessageRepositoryInterface;
