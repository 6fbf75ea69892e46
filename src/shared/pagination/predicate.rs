//! Predicate compiler
//!
//! Turns `where__<field>[__<operator>]` and `order__<field>` keys into
//! structured predicates and sort directives.
//!
//! ```text
//! where__id              = 5      -> id == 5
//! where__id__more_than   = 5      -> id > 5
//! where__title__i_like   = %rust% -> lower(title) LIKE '%rust%'
//! where__likeCount__between = 1,9 -> likeCount BETWEEN 1 AND 9
//! order__createdAt       = DESC   -> ORDER BY createdAt DESC
//! ```

use std::str::FromStr;

use super::error::{PaginationError, PaginationResult};
use super::request::{ClassifiedQuery, QueryValue};

const SEPARATOR: &str = "__";

/// Symbolic filter operators accepted in the third key segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    Equal,
    Not,
    MoreThan,
    MoreThanOrEqual,
    LessThan,
    LessThanOrEqual,
    Like,
    ILike,
    Between,
    In,
    IsNull,
}

impl FilterOperator {
    pub const ALL: [FilterOperator; 11] = [
        Self::Equal,
        Self::Not,
        Self::MoreThan,
        Self::MoreThanOrEqual,
        Self::LessThan,
        Self::LessThanOrEqual,
        Self::Like,
        Self::ILike,
        Self::Between,
        Self::In,
        Self::IsNull,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Self::Equal => "equal",
            Self::Not => "not",
            Self::MoreThan => "more_than",
            Self::MoreThanOrEqual => "more_than_or_equal",
            Self::LessThan => "less_than",
            Self::LessThanOrEqual => "less_than_or_equal",
            Self::Like => "like",
            Self::ILike => "i_like",
            Self::Between => "between",
            Self::In => "in",
            Self::IsNull => "is_null",
        }
    }

    /// Build the comparison this operator denotes for a raw operand.
    pub fn build(self, key: &str, raw: &str) -> PaginationResult<Comparison> {
        let value = QueryValue::parse(raw);
        Ok(match self {
            Self::Equal => Comparison::Equal(value),
            Self::Not => Comparison::NotEqual(value),
            Self::MoreThan => Comparison::MoreThan(value),
            Self::MoreThanOrEqual => Comparison::MoreThanOrEqual(value),
            Self::LessThan => Comparison::LessThan(value),
            Self::LessThanOrEqual => Comparison::LessThanOrEqual(value),
            Self::Like => Comparison::Like(raw.to_string()),
            Self::ILike => Comparison::ILike(raw.to_string()),
            Self::Between => {
                let (low, high) = raw.split_once(',').ok_or_else(|| {
                    PaginationError::invalid_value(key, "expected 'low,high'")
                })?;
                Comparison::Between(
                    QueryValue::parse(low.trim()),
                    QueryValue::parse(high.trim()),
                )
            }
            Self::In => {
                let items: Vec<QueryValue> = raw
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(QueryValue::parse)
                    .collect();
                if items.is_empty() {
                    return Err(PaginationError::invalid_value(key, "empty list"));
                }
                Comparison::In(items)
            }
            Self::IsNull => match raw.to_ascii_lowercase().as_str() {
                "true" | "1" => Comparison::IsNull(true),
                "false" | "0" => Comparison::IsNull(false),
                _ => return Err(PaginationError::invalid_value(key, "expected true or false")),
            },
        })
    }
}

impl FromStr for FilterOperator {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL.into_iter().find(|op| op.name() == s).ok_or(())
    }
}

/// A comparison against a concrete operand.
#[derive(Debug, Clone, PartialEq)]
pub enum Comparison {
    Equal(QueryValue),
    NotEqual(QueryValue),
    MoreThan(QueryValue),
    MoreThanOrEqual(QueryValue),
    LessThan(QueryValue),
    LessThanOrEqual(QueryValue),
    Like(String),
    ILike(String),
    Between(QueryValue, QueryValue),
    In(Vec<QueryValue>),
    IsNull(bool),
}

/// A single field/comparison filter.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub field: String,
    pub comparison: Comparison,
}

impl Predicate {
    pub fn new(field: impl Into<String>, comparison: Comparison) -> Self {
        Self {
            field: field.into(),
            comparison,
        }
    }

    pub fn equals(field: impl Into<String>, value: impl Into<QueryValue>) -> Self {
        Self::new(field, Comparison::Equal(value.into()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

impl FromStr for SortDirection {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "ASC" => Ok(Self::Asc),
            "DESC" => Ok(Self::Desc),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortDirective {
    pub field: String,
    pub direction: SortDirection,
}

/// Compile one `where__*` key into a predicate.
pub fn compile_filter(key: &str, raw: &str) -> PaginationResult<Predicate> {
    let segments: Vec<&str> = key.split(SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(PaginationError::MalformedKey(key.to_string()));
    }

    match segments.as_slice() {
        [_, field] => Ok(Predicate::new(*field, Comparison::Equal(QueryValue::parse(raw)))),
        [_, field, operator] => {
            let op: FilterOperator =
                operator
                    .parse()
                    .map_err(|_| PaginationError::UnknownOperator {
                        key: key.to_string(),
                        operator: operator.to_string(),
                    })?;
            Ok(Predicate::new(*field, op.build(key, raw)?))
        }
        _ => Err(PaginationError::MalformedKey(key.to_string())),
    }
}

/// Compile one `order__*` key into a sort directive.
pub fn compile_order(key: &str, raw: &str) -> PaginationResult<SortDirective> {
    match key.split(SEPARATOR).collect::<Vec<_>>().as_slice() {
        [_, field] if !field.is_empty() => {
            let direction: SortDirection = raw
                .parse()
                .map_err(|_| PaginationError::invalid_value(key, "expected ASC or DESC"))?;
            Ok(SortDirective {
                field: field.to_string(),
                direction,
            })
        }
        _ => Err(PaginationError::MalformedKey(key.to_string())),
    }
}

/// Compile every classified filter and sort key, failing on the first bad one.
pub fn compile(
    classified: &ClassifiedQuery,
) -> PaginationResult<(Vec<Predicate>, Vec<SortDirective>)> {
    let predicates = classified
        .filters
        .iter()
        .map(|(k, v)| compile_filter(k, v))
        .collect::<PaginationResult<Vec<_>>>()?;
    let order = classified
        .orders
        .iter()
        .map(|(k, v)| compile_order(k, v))
        .collect::<PaginationResult<Vec<_>>>()?;
    Ok((predicates, order))
}
