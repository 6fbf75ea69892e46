#[derive(Debug, Clone)]
pub struct CreateCommentDto {
    pub author_id: i32,
    pub comment: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCommentDto {
    pub comment: Option<String>,
}
