//! Database entities module

use chrono::{DateTime, SecondsFormat, Utc};

use crate::shared::pagination::QueryValue;

pub mod comment;
pub mod message;
pub mod post;
pub mod user;

pub use comment::Entity as Comment;
pub use message::Entity as Message;
pub use post::Entity as Post;
pub use user::Entity as User;

/// Timestamps compare as fixed-width RFC 3339 text in memory.
pub(crate) fn timestamp_value(at: &DateTime<Utc>) -> QueryValue {
    QueryValue::Text(at.to_rfc3339_opts(SecondsFormat::Micros, true))
}
