#[derive(Debug, Clone)]
pub struct CreateMessageDto {
    pub author_id: i32,
    pub message: String,
}
