//! Chat message API handlers

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use super::dto::CreateMessageRequest;
use crate::domain::{Message, MessageRepositoryInterface};
use crate::interfaces::http::common::{
    domain_error, pagination_request, ApiError, ApiResponse, ListQuery, PageParams, PageResponse,
    ValidatedJson,
};

#[derive(Clone)]
pub struct MessageHandlerState {
    pub messages: Arc<dyn MessageRepositoryInterface>,
}

#[utoipa::path(
    get,
    path = "/chats/{chat_id}/messages",
    tag = "Messages",
    params(("chat_id" = i32, Path, description = "Chat ID"), PageParams),
    responses(
        (status = 200, description = "One page of the chat's messages", body = PageResponse<Message>),
        (status = 400, description = "Malformed or unknown query parameter")
    )
)]
pub async fn list_messages(
    State(state): State<MessageHandlerState>,
    Path(chat_id): Path<i32>,
    query: ListQuery,
) -> Result<Json<PageResponse<Message>>, ApiError> {
    let request = pagination_request(query);
    let page = state
        .messages
        .list_messages(chat_id, &request)
        .await
        .map_err(domain_error)?;
    Ok(Json(page.into()))
}

#[utoipa::path(
    post,
    path = "/chats/{chat_id}/messages",
    tag = "Messages",
    params(("chat_id" = i32, Path, description = "Chat ID")),
    request_body = CreateMessageRequest,
    responses(
        (status = 201, description = "Message stored", body = ApiResponse<Message>),
        (status = 404, description = "Author not found"),
        (status = 422, description = "Validation error")
    )
)]
pub async fn create_message(
    State(state): State<MessageHandlerState>,
    Path(chat_id): Path<i32>,
    ValidatedJson(request): ValidatedJson<CreateMessageRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Message>>), ApiError> {
    let message = state
        .messages
        .create_message(chat_id, request.into())
        .await
        .map_err(domain_error)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(message))))
}
