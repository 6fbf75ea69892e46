//! Result assembler
//!
//! Runs a composed query against a record store and wraps the rows into a
//! [`Page`], including the link to the following page.

use serde::Deserialize;
use tracing::debug;
use url::Url;

use super::error::{PaginationError, PaginationResult};
use super::page::{next_link, Page, PageCursor};
use super::predicate::Predicate;
use super::query::{plan, PageMode};
use super::request::{classify, PaginationRequest};
use super::store::{PageRecord, RecordStore};

/// Settings used to page listings and to build absolute next links.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PaginationConfig {
    pub protocol: String,
    pub host: String,
    pub default_take: u64,
    pub max_take: u64,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            host: "localhost:3000".to_string(),
            default_take: 20,
            max_take: 100,
        }
    }
}

/// Stateless paginator shared by every list endpoint.
#[derive(Debug, Clone)]
pub struct Paginator {
    config: PaginationConfig,
    base_url: Url,
}

impl Paginator {
    pub fn new(config: PaginationConfig) -> PaginationResult<Self> {
        let raw = format!("{}://{}/", config.protocol, config.host.trim_end_matches('/'));
        let base_url = Url::parse(&raw).map_err(|e| {
            PaginationError::InvalidBaseUrl(format!("{}: {}", raw, e))
        })?;
        if config.default_take == 0 || config.default_take > config.max_take {
            return Err(PaginationError::invalid_value(
                "default_take",
                format!("must be between 1 and max_take ({})", config.max_take),
            ));
        }
        Ok(Self { config, base_url })
    }

    pub fn config(&self) -> &PaginationConfig {
        &self.config
    }

    /// Page through `store`.
    ///
    /// `scope` restricts the listing (e.g. to one post's comments) and `path`
    /// is the resource path the next link points at, such as
    /// `posts/42/comments`.
    pub async fn paginate<R, S>(
        &self,
        request: &PaginationRequest,
        store: &S,
        scope: &[Predicate],
        path: &str,
    ) -> PaginationResult<Page<R>>
    where
        R: PageRecord,
        S: RecordStore<R> + ?Sized,
    {
        let request = request.normalized(self.config.default_take);
        let classified = classify(&request)?;
        let plan = plan(
            &classified,
            scope,
            self.config.default_take,
            self.config.max_take,
        )?;

        if let Some(field) = plan.query.fields().find(|f| !store.has_field(f)) {
            return Err(PaginationError::UnknownField(field.to_string()));
        }

        debug!(
            path,
            mode = ?plan.mode,
            filters = plan.query.filters.len(),
            take = plan.query.take,
            skip = ?plan.query.skip,
            "Executing paginated query"
        );

        let (results, total) = match plan.mode {
            PageMode::Offset { .. } => {
                let total = store.count(&plan.query).await?;
                (store.find(&plan.query).await?, Some(total))
            }
            PageMode::Cursor => (store.find(&plan.query).await?, None),
        };

        // A full page is taken to mean more rows may follow, even when the
        // remaining row count happens to equal `take` exactly.
        let last_item = if results.len() as u64 == plan.query.take {
            results.last()
        } else {
            None
        };

        let next = match last_item {
            Some(item) => {
                let base = self.resource_url(path)?;
                Some(next_link(
                    &base,
                    &request,
                    plan.mode,
                    plan.query.primary_direction(),
                    item.id(),
                ))
            }
            None => None,
        };

        let after = last_item.map(|item| item.id());
        debug!(path, count = results.len(), ?after, "Page assembled");

        Ok(Page {
            count: results.len(),
            cursor: PageCursor { after },
            total,
            next,
            data: results,
        })
    }

    fn resource_url(&self, path: &str) -> PaginationResult<Url> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| PaginationError::InvalidBaseUrl(format!("{}: {}", path, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryStore;
    use crate::shared::pagination::request::QueryValue;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    #[derive(Debug, Clone, PartialEq)]
    struct Note {
        id: i64,
        title: String,
        created_at: DateTime<Utc>,
    }

    impl PageRecord for Note {
        fn id(&self) -> i64 {
            self.id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn field(&self, name: &str) -> Option<QueryValue> {
            match name {
                "id" => Some(self.id.into()),
                "title" => Some(self.title.clone().into()),
                "createdAt" => Some(self.created_at.to_rfc3339().into()),
                _ => None,
            }
        }

        fn has_field(name: &str) -> bool {
            matches!(name, "id" | "title" | "createdAt")
        }
    }

    fn store_with(n: i64) -> InMemoryStore<Note> {
        let epoch = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
        let store = InMemoryStore::new();
        for id in 1..=n {
            store.insert(Note {
                id,
                title: format!("note {}", id),
                created_at: epoch + Duration::minutes(id),
            });
        }
        store
    }

    fn paginator() -> Paginator {
        Paginator::new(PaginationConfig::default()).unwrap()
    }

    fn ids(page: &Page<Note>) -> Vec<i64> {
        page.data.iter().map(|n| n.id).collect()
    }

    #[tokio::test]
    async fn offset_mode_returns_the_requested_slice() {
        let request = PaginationRequest::new()
            .with("page", 2)
            .with("take", 10)
            .with("order__id", "ASC");
        let page = paginator()
            .paginate(&request, &store_with(25), &[], "notes")
            .await
            .unwrap();

        assert_eq!(ids(&page), (11..=20).collect::<Vec<_>>());
        assert_eq!(page.count, 10);
        assert_eq!(page.total, Some(25));
        assert_eq!(
            page.next.as_deref(),
            Some("http://localhost:3000/notes?take=10&order__id=ASC&page=3")
        );
    }

    #[tokio::test]
    async fn ascending_cursor_page_links_past_last_item() {
        let request = PaginationRequest::new()
            .with("take", 2)
            .with("order__createdAt", "ASC");
        let page = paginator()
            .paginate(&request, &store_with(3), &[], "notes")
            .await
            .unwrap();

        assert_eq!(ids(&page), vec![1, 2]);
        assert_eq!(page.cursor.after, Some(2));
        assert_eq!(page.total, None);
        let next = page.next.unwrap();
        assert!(next.contains("where__id__more_than=2"), "{}", next);
    }

    #[tokio::test]
    async fn following_the_cursor_reaches_the_last_page() {
        let store = store_with(3);
        let request = PaginationRequest::new()
            .with("take", 2)
            .with("where__id__more_than", 2);
        let page = paginator()
            .paginate(&request, &store, &[], "notes")
            .await
            .unwrap();

        assert_eq!(ids(&page), vec![3]);
        assert_eq!(page.cursor.after, None);
        assert_eq!(page.next, None);
    }

    #[tokio::test]
    async fn descending_cursor_links_below_last_item() {
        let request = PaginationRequest::new()
            .with("take", 2)
            .with("order__createdAt", "DESC");
        let page = paginator()
            .paginate(&request, &store_with(5), &[], "notes")
            .await
            .unwrap();

        assert_eq!(ids(&page), vec![5, 4]);
        assert!(page.next.unwrap().ends_with("where__id__less_than=4"));
    }

    #[tokio::test]
    async fn short_page_has_no_next_link() {
        let request = PaginationRequest::new().with("take", 10);
        let page = paginator()
            .paginate(&request, &store_with(3), &[], "notes")
            .await
            .unwrap();

        assert_eq!(page.data.len(), 3);
        assert_eq!(page.count, 3);
        assert_eq!(page.next, None);
    }

    #[tokio::test]
    async fn exact_remaining_count_still_reports_next() {
        let request = PaginationRequest::new().with("take", 3);
        let page = paginator()
            .paginate(&request, &store_with(3), &[], "notes")
            .await
            .unwrap();

        assert_eq!(page.count, 3);
        assert!(page.has_next());
    }

    #[tokio::test]
    async fn next_link_carries_every_non_cursor_parameter() {
        let request = PaginationRequest::new()
            .with("take", 1)
            .with("where__title__like", "note%")
            .with("where__id__more_than", 0)
            .with("order__createdAt", "ASC");
        let page = paginator()
            .paginate(&request, &store_with(4), &[], "notes")
            .await
            .unwrap();

        let next = Url::parse(page.next.as_deref().unwrap()).unwrap();
        let carried: Vec<(String, String)> = next
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        for (key, value) in request.params() {
            if key == "where__id__more_than" {
                continue;
            }
            assert!(carried.contains(&(key.to_string(), value.to_string())), "{}", key);
        }
        assert!(carried.contains(&("where__id__more_than".into(), "1".into())));
    }

    #[tokio::test]
    async fn next_link_presence_matches_full_page() {
        let store = store_with(7);
        for take in 1..=9 {
            let request = PaginationRequest::new().with("take", take);
            let page = paginator()
                .paginate(&request, &store, &[], "notes")
                .await
                .unwrap();
            assert_eq!(page.has_next(), page.data.len() as u64 == take);
            assert_eq!(page.count, page.data.len());
        }
    }

    #[tokio::test]
    async fn unknown_operator_and_field_are_rejected() {
        let store = store_with(3);

        let bad_op = PaginationRequest::new().with("where__id__bogus_op", 5);
        let err = paginator()
            .paginate(&bad_op, &store, &[], "notes")
            .await
            .unwrap_err();
        assert!(matches!(err, PaginationError::UnknownOperator { .. }));

        let bad_field = PaginationRequest::new().with("where__rating", 5);
        let err = paginator()
            .paginate(&bad_field, &store, &[], "notes")
            .await
            .unwrap_err();
        assert!(matches!(err, PaginationError::UnknownField(ref f) if f == "rating"));

        let ok = PaginationRequest::new().with("where__id__more_than", 5);
        assert!(paginator().paginate(&ok, &store, &[], "notes").await.is_ok());
    }

    #[tokio::test]
    async fn scoped_path_is_used_for_next_link() {
        let request = PaginationRequest::new().with("take", 1);
        let page = paginator()
            .paginate(&request, &store_with(2), &[], "/posts/42/comments")
            .await
            .unwrap();
        assert!(page
            .next
            .unwrap()
            .starts_with("http://localhost:3000/posts/42/comments?"));
    }

    #[test]
    fn invalid_configuration_is_rejected() {
        let config = PaginationConfig {
            protocol: "http".into(),
            host: "".into(),
            ..PaginationConfig::default()
        };
        assert!(matches!(
            Paginator::new(config),
            Err(PaginationError::InvalidBaseUrl(_))
        ));

        let config = PaginationConfig {
            default_take: 500,
            ..PaginationConfig::default()
        };
        assert!(Paginator::new(config).is_err());
    }
}
