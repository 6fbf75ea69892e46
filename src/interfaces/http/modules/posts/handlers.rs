//! Post API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::{CreatePostRequest, UpdatePostRequest};
use crate::domain::{Post, PostRepositoryInterface};
use crate::interfaces::http::common::{
    domain_error, not_found, pagination_request, ApiError, ApiResponse, ListQuery, PageParams,
    PageResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct PostHandlerState {
    pub posts: Arc<dyn PostRepositoryInterface>,
}

#[utoipa::path(
    get,
    path = "/posts",
    tag = "Posts",
    params(PageParams),
    responses(
        (status = 200, description = "One page of posts", body = PageResponse<Post>),
        (status = 400, description = "Malformed or unknown query parameter")
    )
)]
pub async fn list_posts(
    State(state): State<PostHandlerState>,
    query: ListQuery,
) -> Result<Json<PageResponse<Post>>, ApiError> {
    let request = pagination_request(query);
    let page = state.posts.list_posts(&request).await.map_err(domain_error)?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post details", body = ApiResponse<Post>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_post(
    State(state): State<PostHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    match state.posts.get_post(id).await.map_err(domain_error)? {
        Some(post) => Ok(Json(ApiResponse::success(post))),
        None => Err(not_found("Post", id)),
    }
}

#[utoipa::path(
    post,
    path = "/posts",
    tag = "Posts",
    request_body = CreatePostRequest,
    responses(
        (status = 201, description = "Post created", body = ApiResponse<Post>),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_post(
    State(state): State<PostHandlerState>,
    ValidatedJson(request): ValidatedJson<CreatePostRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Post>>), ApiError> {
    let post = state
        .posts
        .create_post(request.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(post))))
}

#[utoipa::path(
    patch,
    path = "/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = i32, Path, description = "Post ID")),
    request_body = UpdatePostRequest,
    responses(
        (status = 200, description = "Post updated", body = ApiResponse<Post>),
        (status = 404, description = "Not found")
    )
)]
pub async fn update_post(
    State(state): State<PostHandlerState>,
    Path(id): Path<i32>,
    ValidatedJson(request): ValidatedJson<UpdatePostRequest>,
) -> Result<Json<ApiResponse<Post>>, ApiError> {
    match state
        .posts
        .update_post(id, request.into())
        .await
        .map_err(domain_error)?
    {
        Some(post) => Ok(Json(ApiResponse::success(post))),
        None => Err(not_found("Post", id)),
    }
}

#[utoipa::path(
    delete,
    path = "/posts/{post_id}",
    tag = "Posts",
    params(("post_id" = i32, Path, description = "Post ID")),
    responses(
        (status = 200, description = "Post deleted; returns its id", body = ApiResponse<i32>),
        (status = 404, description = "Not found")
    )
)]
pub async fn delete_post(
    State(state): State<PostHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<i32>>, ApiError> {
    state.posts.delete_post(id).await.map_err(domain_error)?;
    Ok(Json(ApiResponse::success(id)))
}
