//! Comments nested under a post

pub mod dto;
pub mod handlers;

pub use dto::*;
pub use handlers::*;
