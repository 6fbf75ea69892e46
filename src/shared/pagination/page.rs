//! Page envelope and next-link construction.

use serde::Serialize;
use url::Url;

use super::predicate::SortDirection;
use super::query::PageMode;
use super::request::{PaginationRequest, CURSOR_AFTER_KEY, CURSOR_BEFORE_KEY, PAGE_KEY};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageCursor {
    pub after: Option<i64>,
}

/// Response envelope of a paginated listing.
///
/// `count` always equals `data.len()`; `next` is set only when the page came
/// back full.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<R> {
    pub data: Vec<R>,
    pub cursor: PageCursor,
    pub count: usize,
    /// Total matching rows, reported in offset mode only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<u64>,
    pub next: Option<String>,
}

impl<R> Page<R> {
    pub fn map<T>(self, f: impl FnMut(R) -> T) -> Page<T> {
        Page {
            data: self.data.into_iter().map(f).collect(),
            cursor: self.cursor,
            count: self.count,
            total: self.total,
            next: self.next,
        }
    }

    pub fn has_next(&self) -> bool {
        self.next.is_some()
    }
}

/// Build the link to the page following the one ending at `last_id`.
///
/// Every request parameter is carried over except the ones the link
/// replaces: the id bounds in cursor mode, `page` in offset mode.
pub fn next_link(
    base: &Url,
    request: &PaginationRequest,
    mode: PageMode,
    direction: SortDirection,
    last_id: i64,
) -> String {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        match mode {
            PageMode::Cursor => {
                for (key, value) in request.params() {
                    if key != CURSOR_AFTER_KEY && key != CURSOR_BEFORE_KEY {
                        pairs.append_pair(key, value);
                    }
                }
                let cursor_key = match direction {
                    SortDirection::Asc => CURSOR_AFTER_KEY,
                    SortDirection::Desc => CURSOR_BEFORE_KEY,
                };
                pairs.append_pair(cursor_key, &last_id.to_string());
            }
            PageMode::Offset { page } => {
                for (key, value) in request.params().filter(|(k, _)| *k != PAGE_KEY) {
                    pairs.append_pair(key, value);
                }
                pairs.append_pair(PAGE_KEY, &(page + 1).to_string());
            }
        }
    }
    url.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("http://localhost:3000/posts").unwrap()
    }

    fn query_pairs(link: &str) -> Vec<(String, String)> {
        Url::parse(link)
            .unwrap()
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect()
    }

    #[test]
    fn ascending_cursor_link_uses_more_than() {
        let request = PaginationRequest::new()
            .with("take", 2)
            .with("order__createdAt", "ASC")
            .with("where__id__more_than", 0);
        let link = next_link(&base(), &request, PageMode::Cursor, SortDirection::Asc, 2);

        assert_eq!(
            link,
            "http://localhost:3000/posts?take=2&order__createdAt=ASC&where__id__more_than=2"
        );
    }

    #[test]
    fn descending_cursor_link_uses_less_than() {
        let request = PaginationRequest::new()
            .with("order__createdAt", "DESC")
            .with("where__id__less_than", 50)
            .with("where__title__i_like", "%a b%");
        let link = next_link(&base(), &request, PageMode::Cursor, SortDirection::Desc, 31);
        let pairs = query_pairs(&link);

        assert!(pairs.contains(&("where__title__i_like".into(), "%a b%".into())));
        assert!(pairs.contains(&("where__id__less_than".into(), "31".into())));
        assert_eq!(pairs.iter().filter(|(k, _)| k == "where__id__less_than").count(), 1);
    }

    #[test]
    fn offset_link_advances_page() {
        let request = PaginationRequest::new().with("page", 2).with("take", 10);
        let link = next_link(
            &base(),
            &request,
            PageMode::Offset { page: 2 },
            SortDirection::Asc,
            20,
        );
        assert_eq!(
            query_pairs(&link),
            vec![
                ("take".to_string(), "10".to_string()),
                ("page".to_string(), "3".to_string())
            ]
        );
    }

    #[test]
    fn map_keeps_metadata() {
        let page = Page {
            data: vec![1, 2],
            cursor: PageCursor { after: Some(2) },
            count: 2,
            total: None,
            next: Some("http://x/".into()),
        };
        let mapped = page.map(|n| n.to_string());
        assert_eq!(mapped.data, vec!["1".to_string(), "2".to_string()]);
        assert_eq!(mapped.cursor.after, Some(2));
        assert!(mapped.has_next());
    }
}
