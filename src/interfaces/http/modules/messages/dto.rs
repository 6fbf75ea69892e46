//! Message DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::CreateMessageDto;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessageRequest {
    #[validate(range(min = 1))]
    pub author_id: i32,
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

impl From<CreateMessageRequest> for CreateMessageDto {
    fn from(r: CreateMessageRequest) -> Self {
        Self {
            author_id: r.author_id,
            message: r.message,
        }
    }
}
