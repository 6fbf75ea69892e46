//! Comment API handlers
//!
//! Every route is nested under `/posts/{post_id}`; a comment is only
//! visible through the post it belongs to.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreateCommentRequest, UpdateCommentRequest};
use crate::domain::{Comment, CommentRepositoryInterface};
use crate::interfaces::http::common::{
    domain_error, not_found, pagination_request, ApiError, ApiResponse, ListQuery, PageParams,
    PageResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct CommentHandlerState {
    pub comments: Arc<dyn CommentRepositoryInterface>,
}

#[utoipa::path(
    get,
    path = "/posts/{post_id}/comments",
    tag = "Comments",
    params(("post_id" = i32, Path, description = "Post ID"), PageParams),
    responses(
        (status = 200, description = "One page of the post's comments", body = PageResponse<Comment>),
        (status = 400, description = "Malformed or unknown query parameter"),
        (status = 404, description = "Post not found")
    )
)]
pub async fn list_comments(
    State(state): State<CommentHandlerState>,
    Path(post_id): Path<i32>,
    query: ListQuery,
) -> Result<Json<PageResponse<Comment>>, ApiError> {
    let request = pagination_request(query);
    let page = state
        .comments
        .list_comments(post_id, &request)
        .await
        .map_err(domain_error)?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/posts/{post_id}/comments/{comment_id}",
    tag = "Comments",
    params(
        ("post_id" = i32, Path, description = "Post ID"),
        ("comment_id" = i32, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment details", body = ApiResponse<Comment>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_comment(
    State(state): State<CommentHandlerState>,
    Path((post_id, comment_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<Comment>>, ApiError> {
    match state
        .comments
        .get_comment(post_id, comment_id)
        .await
        .map_err(domain_error)?
    {
        Some(comment) => Ok(Json(ApiResponse::success(comment))),
        None => Err(not_found("Comment", comment_id)),
    }
}

#[utoipa::path(
    post,
    path = "/posts/{post_id}/comments",
    tag = "Comments",
    params(("post_id" = i32, Path, description = "Post ID")),
    request_body = CreateCommentRequest,
    responses(
        (status = 201, description = "Comment created", body = ApiResponse<Comment>),
        (status = 404, description = "Post or author not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_comment(
    State(state): State<CommentHandlerState>,
    Path(post_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CreateCommentRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Comment>>), ApiError> {
    let comment = state
        .comments
        .create_comment(post_id, request.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(comment))))
}

#[utoipa::path(
    patch,
    path = "/posts/{post_id}/comments/{comment_id}",
    tag = "Comments",
    params(
        ("post_id" = i32, Path, description = "Post ID"),
        ("comment_id" = i32, Path, description = "Comment ID")
    ),
    request_body = UpdateCommentRequest,
    responses(
        (status = 200, description = "Comment updated", body = ApiResponse<Comment>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_comment(
    State(state): State<CommentHandlerState>,
    Path((post_id, comment_id)): Path<(i32, i32)>,
    ValidatedJson(request): ValidatedJson<UpdateCommentRequest>,
) -> Result<Json<ApiResponse<Comment>>, ApiError> {
    match state
        .comments
        .update_comment(post_id, comment_id, request.into())
        .await
        .map_err(domain_error)?
    {
        Some(comment) => Ok(Json(ApiResponse::success(comment))),
        None => Err(not_found("Comment", comment_id)),
    }
}

#[utoipa::path(
    delete,
    path = "/posts/{post_id}/comments/{comment_id}",
    tag = "Comments",
    params(
        ("post_id" = i32, Path, description = "Post ID"),
        ("comment_id" = i32, Path, description = "Comment ID")
    ),
    responses(
        (status = 200, description = "Comment deleted; returns its id", body = ApiResponse<i32>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_comment(
    State(state): State<CommentHandlerState>,
    Path((post_id, comment_id)): Path<(i32, i32)>,
) -> Result<Json<ApiResponse<i32>>, ApiError> {
    state
        .comments
        .delete_comment(post_id, comment_id)
        .await
        .map_err(domain_error)?;
    Ok(Json(ApiResponse::success(comment_id)))
}
