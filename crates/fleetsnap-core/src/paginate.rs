//! Token-driven pagination

use crate::error::Result;
use std::future::Future;

/// One page of a list response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    next_token: Option<String>,
}

impl<T> Page<T> {
    /// An empty-string token is treated as "no more pages"
    pub fn new(items: Vec<T>, next_token: Option<String>) -> Self {
        Self {
            items,
            next_token: next_token.filter(|t| !t.is_empty()),
        }
    }

    /// A final page with no continuation token
    pub fn last(items: Vec<T>) -> Self {
        Self::new(items, None)
    }

    pub fn items(&self) -> &[T] {
        &self.items
    }

    pub fn next_token(&self) -> Option<&str> {
        self.next_token.as_deref()
    }

    pub fn into_parts(self) -> (Vec<T>, Option<String>) {
        (self.items, self.next_token)
    }
}

/// Drive `fetch_page` until a page comes back without a continuation token
///
/// The first call receives `None`. Items are accumulated in page order. A
/// page carrying a token but no items is still followed; only the absence of
/// a token ends the loop. The first error is returned as-is and everything
/// gathered so far is dropped.
///
/// There is no page cap: an API that keeps returning the same token will
/// keep this looping.
pub async fn collect_pages<T, F, Fut>(operation: &str, mut fetch_page: F) -> Result<Vec<T>>
where
    F: FnMut(Option<String>) -> Fut,
    Fut: Future<Output = Result<Page<T>>>,
{
    let mut items = Vec::new();
    let mut token: Option<String> = None;
    let mut pages = 0usize;

    loop {
        let (page_items, next_token) = fetch_page(token.take()).await?.into_parts();
        pages += 1;
        tracing::trace!(
            operation,
            page = pages,
            items = page_items.len(),
            more = next_token.is_some(),
            "Fetched page"
        );
        items.extend(page_items);

        match next_token {
            Some(next) => token = Some(next),
            None => break,
        }
    }

    tracing::debug!(operation, pages, items = items.len(), "Pagination complete");
    Ok(items)
}
