//! In-memory record store for development and testing

use std::cmp::Ordering;

use async_trait::async_trait;
use dashmap::DashMap;
use sea_orm::DbErr;

use crate::shared::pagination::{
    Comparison, FindQuery, PageRecord, Predicate, QueryValue, RecordStore, SortDirection,
};

/// Records kept in a concurrent map keyed by id.
pub struct InMemoryStore<R: PageRecord> {
    records: DashMap<i64, R>,
}

impl<R: PageRecord> InMemoryStore<R> {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }

    /// Insert or replace a record.
    pub fn insert(&self, record: R) {
        self.records.insert(record.id(), record);
    }

    pub fn remove(&self, id: i64) -> Option<R> {
        self.records.remove(&id).map(|(_, r)| r)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn matching(&self, query: &FindQuery) -> Vec<R> {
        let mut rows: Vec<R> = self
            .records
            .iter()
            .filter(|entry| query.filters.iter().all(|p| evaluate(entry.value(), p)))
            .map(|entry| entry.value().clone())
            .collect();

        // Base order is id in the primary direction so ties line up with
        // the next cursor's id bound.
        match query.primary_direction() {
            SortDirection::Asc => rows.sort_by_key(|r| r.id()),
            SortDirection::Desc => rows.sort_by_key(|r| std::cmp::Reverse(r.id())),
        }
        rows.sort_by(|a, b| {
            query
                .order
                .iter()
                .map(|o| {
                    let ord = compare_fields(a.field(&o.field), b.field(&o.field));
                    match o.direction {
                        SortDirection::Asc => ord,
                        SortDirection::Desc => ord.reverse(),
                    }
                })
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or(Ordering::Equal)
        });
        rows
    }
}

impl<R: PageRecord> Default for InMemoryStore<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<R: PageRecord> RecordStore<R> for InMemoryStore<R> {
    fn has_field(&self, field: &str) -> bool {
        R::has_field(field)
    }

    async fn find(&self, query: &FindQuery) -> Result<Vec<R>, DbErr> {
        let skip = query.skip.unwrap_or(0) as usize;
        Ok(self
            .matching(query)
            .into_iter()
            .skip(skip)
            .take(query.take as usize)
            .collect())
    }

    async fn count(&self, query: &FindQuery) -> Result<u64, DbErr> {
        Ok(self.matching(query).len() as u64)
    }
}

// Nulls sort first, matching SQLite's ascending order.
fn compare_fields(a: Option<QueryValue>, b: Option<QueryValue>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.compare(&b).unwrap_or(Ordering::Equal),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

fn evaluate<R: PageRecord>(record: &R, predicate: &Predicate) -> bool {
    match (&predicate.comparison, record.field(&predicate.field)) {
        (Comparison::IsNull(expected), value) => value.is_none() == *expected,
        (_, None) => false,
        (comparison, Some(value)) => satisfies(&value, comparison),
    }
}

fn satisfies(value: &QueryValue, comparison: &Comparison) -> bool {
    let ord = |operand: &QueryValue| value.compare(operand);
    match comparison {
        Comparison::Equal(v) => value.matches(v),
        Comparison::NotEqual(v) => !value.matches(v),
        Comparison::MoreThan(v) => ord(v) == Some(Ordering::Greater),
        Comparison::MoreThanOrEqual(v) => matches!(ord(v), Some(Ordering::Greater | Ordering::Equal)),
        Comparison::LessThan(v) => ord(v) == Some(Ordering::Less),
        Comparison::LessThanOrEqual(v) => matches!(ord(v), Some(Ordering::Less | Ordering::Equal)),
        Comparison::Like(pattern) => like(pattern, &value.to_string()),
        Comparison::ILike(pattern) => {
            like(&pattern.to_lowercase(), &value.to_string().to_lowercase())
        }
        Comparison::Between(low, high) => {
            matches!(ord(low), Some(Ordering::Greater | Ordering::Equal))
                && matches!(ord(high), Some(Ordering::Less | Ordering::Equal))
        }
        Comparison::In(items) => items.iter().any(|v| value.matches(v)),
        Comparison::IsNull(expected) => !expected,
    }
}

/// SQL `LIKE` matching: `%` matches any run of characters, `_` exactly one.
fn like(pattern: &str, text: &str) -> bool {
    let p: Vec<char> = pattern.chars().collect();
    let t: Vec<char> = text.chars().collect();
    let (mut pi, mut ti) = (0, 0);
    let mut backtrack: Option<(usize, usize)> = None;

    while ti < t.len() {
        if pi < p.len() && (p[pi] == '_' || (p[pi] != '%' && p[pi] == t[ti])) {
            pi += 1;
            ti += 1;
        } else if pi < p.len() && p[pi] == '%' {
            backtrack = Some((pi, ti));
            pi += 1;
        } else if let Some((bp, bt)) = backtrack {
            pi = bp + 1;
            ti = bt + 1;
            backtrack = Some((bp, bt + 1));
        } else {
            return false;
        }
    }
    p[pi..].iter().all(|c| *c == '%')
}
