use super::UserRole;

#[derive(Debug, Clone)]
pub struct CreateUserDto {
    pub nickname: String,
    pub email: String,
    pub password: String,
    pub role: Option<UserRole>,
}
