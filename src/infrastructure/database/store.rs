//! SeaORM-backed record store
//!
//! Compiles storage-agnostic [`FindQuery`] values into SeaORM selects. Field
//! names are resolved through [`QueryableEntity::column`], so only columns an
//! entity explicitly exposes can be filtered or sorted on.

use std::marker::PhantomData;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::{Expr, Func, SimpleExpr};
use sea_orm::{
    ColumnTrait, Condition, ConnectionTrait, DatabaseBackend, DatabaseConnection, DbErr,
    EntityTrait, Order, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Select, Value,
};

use crate::shared::pagination::{
    Comparison, FindQuery, PageRecord, Predicate, QueryValue, RecordStore, SortDirection,
};

/// Maps API field names (camelCase) onto entity columns.
pub trait QueryableEntity: EntityTrait {
    fn column(field: &str) -> Option<Self::Column>;
}

/// Record store reading one entity's table.
pub struct SeaOrmStore<E> {
    db: DatabaseConnection,
    _entity: PhantomData<fn() -> E>,
}

impl<E> SeaOrmStore<E> {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            _entity: PhantomData,
        }
    }
}

impl<E> Clone for SeaOrmStore<E> {
    fn clone(&self) -> Self {
        Self::new(self.db.clone())
    }
}

impl<E> SeaOrmStore<E>
where
    E: QueryableEntity,
    E::Model: PageRecord,
{
    fn filtered(&self, query: &FindQuery) -> Result<Select<E>, DbErr> {
        let backend = self.db.get_database_backend();
        Ok(E::find().filter(condition::<E>(&query.filters, backend)?))
    }
}

#[async_trait]
impl<E> RecordStore<E::Model> for SeaOrmStore<E>
where
    E: QueryableEntity,
    E::Model: PageRecord,
{
    fn has_field(&self, field: &str) -> bool {
        E::column(field).is_some()
    }

    async fn find(&self, query: &FindQuery) -> Result<Vec<E::Model>, DbErr> {
        let mut select = self.filtered(query)?;

        for directive in &query.order {
            let column = resolve::<E>(&directive.field)?;
            select = select.order_by(column, order_of(directive.direction));
        }
        // Ties fall back to id in the primary direction, matching the
        // `more_than`/`less_than` id bound of the next cursor.
        if let Some(id) = E::column("id") {
            select = select.order_by(id, order_of(query.primary_direction()));
        }

        if let Some(skip) = query.skip {
            select = select.offset(skip);
        }

        select.limit(query.take).all(&self.db).await
    }

    async fn count(&self, query: &FindQuery) -> Result<u64, DbErr> {
        self.filtered(query)?.count(&self.db).await
    }
}

fn order_of(direction: SortDirection) -> Order {
    match direction {
        SortDirection::Asc => Order::Asc,
        SortDirection::Desc => Order::Desc,
    }
}

fn resolve<E: QueryableEntity>(field: &str) -> Result<E::Column, DbErr> {
    E::column(field).ok_or_else(|| DbErr::Custom(format!("Unknown column: {}", field)))
}

fn condition<E: QueryableEntity>(
    filters: &[Predicate],
    backend: DatabaseBackend,
) -> Result<Condition, DbErr> {
    filters.iter().try_fold(Condition::all(), |cond, predicate| {
        let column = resolve::<E>(&predicate.field)?;
        Ok(cond.add(expression(column, &predicate.comparison, backend)))
    })
}

fn expression<C: ColumnTrait>(
    column: C,
    comparison: &Comparison,
    backend: DatabaseBackend,
) -> SimpleExpr {
    match comparison {
        Comparison::Equal(v) => column.eq(bind(v)),
        Comparison::NotEqual(v) => column.ne(bind(v)),
        Comparison::MoreThan(v) => column.gt(bind(v)),
        Comparison::MoreThanOrEqual(v) => column.gte(bind(v)),
        Comparison::LessThan(v) => column.lt(bind(v)),
        Comparison::LessThanOrEqual(v) => column.lte(bind(v)),
        // SQLite's LIKE ignores ASCII case; GLOB keeps `like` case-sensitive.
        Comparison::Like(pattern) if backend == DatabaseBackend::Sqlite => Expr::cust_with_exprs(
            "$1 GLOB $2",
            [
                SimpleExpr::from(Expr::col((column.entity_name(), column))),
                SimpleExpr::from(Expr::val(like_to_glob(pattern))),
            ],
        ),
        Comparison::Like(pattern) => column.like(pattern.as_str()),
        Comparison::ILike(pattern) => {
            Expr::expr(Func::lower(Expr::col((column.entity_name(), column))))
                .like(pattern.to_lowercase())
        }
        Comparison::Between(low, high) => column.between(bind(low), bind(high)),
        Comparison::In(items) => column.is_in(items.iter().map(bind)),
        Comparison::IsNull(true) => column.is_null(),
        Comparison::IsNull(false) => column.is_not_null(),
    }
}

/// Rewrite a `LIKE` pattern as a `GLOB` pattern: `%` and `_` become `*` and
/// `?`, and characters GLOB treats as special are matched literally.
fn like_to_glob(pattern: &str) -> String {
    let mut glob = String::with_capacity(pattern.len());
    for c in pattern.chars() {
        match c {
            '%' => glob.push('*'),
            '_' => glob.push('?'),
            '*' => glob.push_str("[*]"),
            '?' => glob.push_str("[?]"),
            '[' => glob.push_str("[[]"),
            other => glob.push(other),
        }
    }
    glob
}

/// RFC 3339 operands are bound as timestamps so they compare against
/// timestamp columns in the database's own encoding.
fn bind(value: &QueryValue) -> Value {
    match value {
        QueryValue::Int(n) => (*n).into(),
        QueryValue::Float(f) => (*f).into(),
        QueryValue::Bool(b) => (*b).into(),
        QueryValue::Text(s) => match DateTime::parse_from_rfc3339(s) {
            Ok(at) => at.with_timezone(&Utc).into(),
            Err(_) => s.clone().into(),
        },
    }
}
