pub mod pagination;

pub use pagination::{Page, PaginationError, PaginationRequest, Paginator};
