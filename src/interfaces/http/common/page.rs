use axum::extract::Query;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::shared::{Page, PaginationRequest};

/// Raw query string of a list endpoint, kept as ordered pairs.
pub type ListQuery = Query<Vec<(String, String)>>;

pub fn pagination_request(Query(pairs): ListQuery) -> PaginationRequest {
    PaginationRequest::from_pairs(pairs)
}

/// Documented list parameters. Filters use `where__<field>[__<operator>]`,
/// ordering uses `order__<field>=ASC|DESC`.
#[allow(dead_code)]
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// Page number; switches to offset pagination and reports `total`.
    pub page: Option<u64>,
    /// Page size, 1 to the configured maximum.
    pub take: Option<u64>,
    /// Cursor: return rows with a larger id.
    #[serde(rename = "where__id__more_than")]
    pub after_id: Option<i64>,
    /// Cursor for descending order: return rows with a smaller id.
    #[serde(rename = "where__id__less_than")]
    pub before_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CursorDto {
    /// Id of the last row when more pages may follow.
    pub after: Option<i64>,
}

/// Paginated listing.
#[derive(Debug, Serialize, ToSchema)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub cursor: CursorDto,
    pub count: usize,
    /// Total matching rows; offset pagination only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    /// Absolute URL of the next page.
    pub next: Option<String>,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            data: page.data,
            cursor: CursorDto {
                after: page.cursor.after,
            },
            count: page.count,
            total: page.total,
            next: page.next,
        }
    }
}
