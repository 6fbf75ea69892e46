#[derive(Debug, Clone)]
pub struct CreatePostDto {
    pub author_id: i32,
    pub title: String,
    pub content: String,
}

/// Partial update; `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdatePostDto {
    pub title: Option<String>,
    pub content: Option<String>,
}
