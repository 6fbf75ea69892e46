//! Pagination strategy selection and the composed query.

use super::error::{PaginationError, PaginationResult};
use super::predicate::{compile, Predicate, SortDirection, SortDirective};
use super::request::{ClassifiedQuery, PAGE_KEY, TAKE_KEY};

/// How the requested page is located.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageMode {
    /// `page` was supplied: skip `take * (page - 1)` rows and report a total.
    Offset { page: u64 },
    /// No `page`: the caller bounds on the last-seen id.
    Cursor,
}

impl PageMode {
    /// Rows to skip before the page; `None` in cursor mode.
    ///
    /// Offsets beyond what SQL `OFFSET` accepts (`i64::MAX`) are rejected.
    pub fn skip(self, take: u64) -> PaginationResult<Option<u64>> {
        match self {
            Self::Offset { page } => take
                .checked_mul(page - 1)
                .filter(|skip| *skip <= i64::MAX as u64)
                .map(Some)
                .ok_or_else(|| PaginationError::invalid_value(PAGE_KEY, "page is out of range")),
            Self::Cursor => Ok(None),
        }
    }
}

/// Storage-agnostic query handed to a record store.
#[derive(Debug, Clone, PartialEq)]
pub struct FindQuery {
    pub filters: Vec<Predicate>,
    pub order: Vec<SortDirective>,
    pub take: u64,
    pub skip: Option<u64>,
}

impl FindQuery {
    /// Every field the query filters or sorts on.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.filters
            .iter()
            .map(|p| p.field.as_str())
            .chain(self.order.iter().map(|o| o.field.as_str()))
    }

    /// Direction of the first sort directive; ascending when unsorted.
    pub fn primary_direction(&self) -> SortDirection {
        self.order
            .first()
            .map_or(SortDirection::Asc, |o| o.direction)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct QueryPlan {
    pub mode: PageMode,
    pub query: FindQuery,
}

fn parse_positive(key: &str, raw: &str) -> PaginationResult<u64> {
    match raw.trim().parse::<u64>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(PaginationError::invalid_value(key, "expected a positive integer")),
    }
}

/// Compile a classified request into a query plan.
///
/// `scope` predicates (e.g. "comments of post 42") are applied ahead of the
/// request's own filters.
pub fn plan(
    classified: &ClassifiedQuery,
    scope: &[Predicate],
    default_take: u64,
    max_take: u64,
) -> PaginationResult<QueryPlan> {
    let take = match classified.take.as_deref() {
        Some(raw) => parse_positive(TAKE_KEY, raw)?,
        None => default_take,
    };
    if take > max_take {
        return Err(PaginationError::invalid_value(
            TAKE_KEY,
            format!("must not exceed {}", max_take),
        ));
    }

    let mode = match classified.page.as_deref() {
        Some(raw) => PageMode::Offset {
            page: parse_positive(PAGE_KEY, raw)?,
        },
        None => PageMode::Cursor,
    };

    let skip = mode.skip(take)?;
    let (predicates, order) = compile(classified)?;
    let filters = scope.iter().cloned().chain(predicates).collect();

    Ok(QueryPlan {
        mode,
        query: FindQuery {
            filters,
            order,
            take,
            skip,
        },
    })
}
