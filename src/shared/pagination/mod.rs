//! Generic list pagination
//!
//! List endpoints receive a flat set of query parameters:
//!
//! - `where__<field>` / `where__<field>__<operator>` filter rows,
//! - `order__<field>=ASC|DESC` sorts them,
//! - `take` sets the page size and `page` switches to offset paging.
//!
//! Without `page` the listing is cursor based: the response's `next` link
//! bounds the id of the last row returned (`where__id__more_than` or
//! `where__id__less_than`, depending on the sort direction).

pub mod error;
pub mod page;
pub mod paginator;
pub mod predicate;
pub mod query;
pub mod request;
pub mod store;

pub use error::{PaginationError, PaginationResult};
pub use page::{Page, PageCursor};
pub use paginator::{PaginationConfig, Paginator};
pub use predicate::{Comparison, FilterOperator, Predicate, SortDirection, SortDirective};
pub use query::{FindQuery, PageMode};
pub use request::{PaginationRequest, QueryValue};
pub use store::{PageRecord, RecordStore};
