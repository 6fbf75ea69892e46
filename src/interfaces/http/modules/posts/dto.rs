//! Post DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreatePostDto, UpdatePostDto};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreatePostRequest {
    #[validate(range(min = 1))]
    pub author_id: i32,
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    #[validate(length(min = 1))]
    pub content: String,
}

impl From<CreatePostRequest> for CreatePostDto {
    fn from(r: CreatePostRequest) -> Self {
        Self {
            author_id: r.author_id,
            title: r.title,
            content: r.content,
        }
    }
}

/// Partial update; omitted fields are left as they are.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub content: Option<String>,
}

impl From<UpdatePostRequest> for UpdatePostDto {
    fn from(r: UpdatePostRequest) -> Self {
        Self {
            title: r.title,
            content: r.content,
        }
    }
}
