//! User DTOs

use serde::Deserialize;
use utoipa::ToSchema;
use validator::Validate;

use crate::domain::{CreateUserDto, UserRole};

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(min = 1, max = 20))]
    pub nickname: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 3, max = 8))]
    pub password: String,
    /// Defaults to `user`.
    pub role: Option<UserRole>,
}

impl From<CreateUserRequest> for CreateUserDto {
    fn from(r: CreateUserRequest) -> Self {
        Self {
            nickname: r.nickname,
            email: r.email,
            password: r.password,
            role: r.role,
        }
    }
}
