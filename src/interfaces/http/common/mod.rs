//! Shared HTTP building blocks: response envelopes, error mapping and
//! request extractors.

mod api_response;
mod error;
mod page;
mod validated_json;

pub use api_response::ApiResponse;
pub use error::{domain_error, not_found, ApiError};
pub use page::{pagination_request, CursorDto, ListQuery, PageParams, PageResponse};
pub use validated_json::{ValidatedJson, ValidatedJsonRejection};
