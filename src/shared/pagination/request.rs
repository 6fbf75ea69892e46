//! Pagination request and the query classifier.
//!
//! A request is the flat list of query-string pairs a list endpoint
//! received. Values are kept exactly as received so they can be echoed
//! back unchanged in the `next` link; they are coerced to typed values
//! only when predicates are compiled.

use std::cmp::Ordering;
use std::fmt;

use super::error::{PaginationError, PaginationResult};

pub const PAGE_KEY: &str = "page";
pub const TAKE_KEY: &str = "take";
pub const WHERE_PREFIX: &str = "where__";
pub const ORDER_PREFIX: &str = "order__";
pub const DEFAULT_ORDER_KEY: &str = "order__createdAt";

/// Cursor bound used when the primary sort is ascending.
pub const CURSOR_AFTER_KEY: &str = "where__id__more_than";
/// Cursor bound used when the primary sort is descending.
pub const CURSOR_BEFORE_KEY: &str = "where__id__less_than";

/// A primitive operand coerced from a raw query-string value.
#[derive(Debug, Clone, PartialEq)]
pub enum QueryValue {
    Int(i64),
    Float(f64),
    Text(String),
    Bool(bool),
}

impl QueryValue {
    /// Coerce a raw value: integer first, then finite float, else text.
    pub fn parse(raw: &str) -> Self {
        if let Ok(i) = raw.parse::<i64>() {
            return Self::Int(i);
        }
        match raw.parse::<f64>() {
            Ok(f) if f.is_finite() => Self::Float(f),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Ordering used by in-memory evaluation. Numbers compare numerically,
    /// everything else falls back to comparing the textual forms.
    pub fn compare(&self, other: &QueryValue) -> Option<Ordering> {
        match (self, other) {
            (Self::Bool(a), Self::Bool(b)) => Some(a.cmp(b)),
            (Self::Text(a), Self::Text(b)) => Some(a.cmp(b)),
            _ => match (self.as_f64(), other.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b),
                _ => Some(self.to_string().cmp(&other.to_string())),
            },
        }
    }

    pub fn matches(&self, other: &QueryValue) -> bool {
        self.compare(other) == Some(Ordering::Equal)
    }
}

impl fmt::Display for QueryValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(i) => write!(f, "{}", i),
            Self::Float(v) => write!(f, "{}", v),
            Self::Text(s) => write!(f, "{}", s),
            Self::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<i64> for QueryValue {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for QueryValue {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for QueryValue {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<bool> for QueryValue {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<&str> for QueryValue {
    fn from(v: &str) -> Self {
        Self::Text(v.to_string())
    }
}

impl From<String> for QueryValue {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

/// Flat key/value parameters of a list request, in arrival order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaginationRequest {
    params: Vec<(String, String)>,
}

impl PaginationRequest {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            params: pairs
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    /// Set `key`, replacing any value it already had.
    pub fn with(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        let key = key.into();
        let value = value.to_string();
        match self.params.iter_mut().find(|(k, _)| *k == key) {
            Some(slot) => slot.1 = value,
            None => self.params.push((key, value)),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn params(&self) -> impl Iterator<Item = (&str, &str)> {
        self.params.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Fill in the implicit defaults: `take` and an ascending creation-time order.
    pub fn normalized(&self, default_take: u64) -> Self {
        let mut normalized = self.clone();
        if !normalized.contains(TAKE_KEY) {
            normalized.params.push((TAKE_KEY.to_string(), default_take.to_string()));
        }
        if !normalized.params.iter().any(|(k, _)| k.starts_with(ORDER_PREFIX)) {
            normalized
                .params
                .push((DEFAULT_ORDER_KEY.to_string(), "ASC".to_string()));
        }
        normalized
    }
}

/// Request parameters partitioned by role.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassifiedQuery {
    pub filters: Vec<(String, String)>,
    pub orders: Vec<(String, String)>,
    pub page: Option<String>,
    pub take: Option<String>,
}

/// Partition a request into filters, sort directives and the paging controls.
///
/// Keys that are neither reserved nor carry a known prefix are rejected so
/// that typos surface as client errors instead of being silently ignored.
pub fn classify(request: &PaginationRequest) -> PaginationResult<ClassifiedQuery> {
    let mut classified = ClassifiedQuery::default();

    for (key, value) in request.params() {
        match key {
            PAGE_KEY => {
                classified.page.get_or_insert_with(|| value.to_string());
            }
            TAKE_KEY => {
                classified.take.get_or_insert_with(|| value.to_string());
            }
            k if k.starts_with(WHERE_PREFIX) => {
                classified.filters.push((k.to_string(), value.to_string()));
            }
            k if k.starts_with(ORDER_PREFIX) => {
                classified.orders.push((k.to_string(), value.to_string()));
            }
            other => return Err(PaginationError::UnknownParameter(other.to_string())),
        }
    }

    Ok(classified)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> PaginationRequest {
        PaginationRequest::new()
            .with("where__likeCount__more_than", 10)
            .with("order__createdAt", "DESC")
            .with("take", 5)
            .with("where__title__i_like", "%rust%")
    }

    #[test]
    fn partitions_by_prefix() {
        let classified = classify(&sample()).unwrap();

        assert_eq!(
            classified.filters,
            vec![
                ("where__likeCount__more_than".to_string(), "10".to_string()),
                ("where__title__i_like".to_string(), "%rust%".to_string()),
            ]
        );
        assert_eq!(
            classified.orders,
            vec![("order__createdAt".to_string(), "DESC".to_string())]
        );
        assert_eq!(classified.take.as_deref(), Some("5"));
        assert_eq!(classified.page, None);
    }

    #[test]
    fn classification_is_idempotent() {
        let request = sample();
        assert_eq!(classify(&request).unwrap(), classify(&request).unwrap());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let request = sample().with("sort", "title");
        let err = classify(&request).unwrap_err();
        assert!(matches!(err, PaginationError::UnknownParameter(ref k) if k == "sort"));
        assert!(err.is_client_error());
    }

    #[test]
    fn normalization_adds_take_and_default_order() {
        let normalized = PaginationRequest::new().normalized(20);
        assert_eq!(normalized.get("take"), Some("20"));
        assert_eq!(normalized.get("order__createdAt"), Some("ASC"));
    }

    #[test]
    fn normalization_keeps_explicit_values() {
        let request = PaginationRequest::new()
            .with("take", 3)
            .with("order__id", "DESC");
        let normalized = request.normalized(20);
        assert_eq!(normalized.get("take"), Some("3"));
        assert_eq!(normalized.get("order__createdAt"), None);
        assert_eq!(normalized.get("order__id"), Some("DESC"));
    }

    #[test]
    fn with_replaces_existing_value() {
        let request = PaginationRequest::new().with("take", 3).with("take", 7);
        assert_eq!(request.params().count(), 1);
        assert_eq!(request.get("take"), Some("7"));
    }

    #[test]
    fn values_are_coerced_by_shape() {
        assert_eq!(QueryValue::parse("42"), QueryValue::Int(42));
        assert_eq!(QueryValue::parse("-1.5"), QueryValue::Float(-1.5));
        assert_eq!(QueryValue::parse("inf"), QueryValue::Text("inf".into()));
        assert_eq!(QueryValue::parse("hello"), QueryValue::Text("hello".into()));
    }

    #[test]
    fn mixed_numeric_values_compare_numerically() {
        assert_eq!(
            QueryValue::Int(2).compare(&QueryValue::Float(10.0)),
            Some(Ordering::Less)
        );
        assert!(QueryValue::Int(3).matches(&QueryValue::Float(3.0)));
        assert!(QueryValue::Text("7".into()).matches(&QueryValue::Int(7)));
    }
}
