//! User API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::CreateUserRequest;
use crate::domain::{User, UserRepositoryInterface};
use crate::interfaces::http::common::{
    domain_error, not_found, pagination_request, ApiError, ApiResponse, ListQuery, PageParams,
    PageResponse, ValidatedJson,
};

#[derive(Clone)]
pub struct UserHandlerState {
    pub users: Arc<dyn UserRepositoryInterface>,
}

#[utoipa::path(
    get,
    path = "/users",
    tag = "Users",
    params(PageParams),
    responses(
        (status = 200, description = "One page of users", body = PageResponse<User>),
        (status = 400, description = "Malformed or unknown query parameter")
    )
)]
pub async fn list_users(
    State(state): State<UserHandlerState>,
    query: ListQuery,
) -> Result<Json<PageResponse<User>>, ApiError> {
    let request = pagination_request(query);
    let page = state.users.list_users(&request).await.map_err(domain_error)?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    get,
    path = "/users/{id}",
    tag = "Users",
    params(("id" = i32, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = ApiResponse<User>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_user(
    State(state): State<UserHandlerState>,
    Path(id): Path<i32>,
) -> Result<Json<ApiResponse<User>>, ApiError> {
    match state.users.get_user_by_id(id).await.map_err(domain_error)? {
        Some(user) => Ok(Json(ApiResponse::success(user))),
        None => Err(not_found("User", id)),
    }
}

#[utoipa::path(
    post,
    path = "/users",
    tag = "Users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = ApiResponse<User>),
        (status = 409, description = "Nickname or email already exists"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_user(
    State(state): State<UserHandlerState>,
    ValidatedJson(request): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<User>>), ApiError> {
    let user = state
        .users
        .create_user(request.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(user))))
}
