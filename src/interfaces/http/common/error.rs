use axum::http::StatusCode;
use axum::Json;
use tracing::error;

use super::ApiResponse;
use crate::domain::DomainError;

pub type ApiError = (StatusCode, Json<ApiResponse<()>>);

/// Map a domain failure onto an HTTP status and error envelope.
///
/// Server-side failures are logged and reported without internals.
pub fn domain_error(err: DomainError) -> ApiError {
    let status = match &err {
        DomainError::NotFound { .. } => StatusCode::NOT_FOUND,
        DomainError::Conflict(_) => StatusCode::CONFLICT,
        DomainError::Validation(_) => StatusCode::BAD_REQUEST,
        DomainError::Pagination(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
        DomainError::Pagination(_) | DomainError::Database(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };

    if status.is_server_error() {
        error!("Request failed: {}", err);
        return (status, Json(ApiResponse::error("Internal server error")));
    }
    (status, Json(ApiResponse::error(err.to_string())))
}

pub fn not_found(entity: &'static str, id: i32) -> ApiError {
    domain_error(DomainError::not_found(entity, id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::PaginationError;

    #[test]
    fn statuses_follow_error_kind() {
        assert_eq!(not_found("Post", 1).0, StatusCode::NOT_FOUND);
        assert_eq!(
            domain_error(DomainError::Conflict("taken".into())).0,
            StatusCode::CONFLICT
        );
        assert_eq!(
            domain_error(PaginationError::UnknownParameter("foo".into()).into()).0,
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            domain_error(PaginationError::InvalidBaseUrl("x".into()).into()).0,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn server_errors_hide_details() {
        let (status, Json(body)) =
            domain_error(sea_orm::DbErr::Custom("disk on fire".into()).into());
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("Internal server error"));
    }
}
