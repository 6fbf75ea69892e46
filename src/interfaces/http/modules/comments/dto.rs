//! Comment DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateCommentDto, UpdateCommentDto};

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateCommentRequest {
    #[validate(range(min = 1))]
    pub author_id: i32,
    #[validate(length(min = 1, max = 1000))]
    pub comment: String,
}

impl From<CreateCommentRequest> for CreateCommentDto {
    fn from(r: CreateCommentRequest) -> Self {
        Self {
            author_id: r.author_id,
            comment: r.comment,
        }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct UpdateCommentRequest {
    #[validate(length(min = 1, max = 1000))]
    pub comment: Option<String>,
}

impl From<UpdateCommentRequest> for UpdateCommentDto {
    fn from(r: UpdateCommentRequest) -> Self {
        Self { comment: r.comment }
    }
}
