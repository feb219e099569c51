/******************************************************************************
   Author: Joaquín Béjar García
   Email: jb@taunais.com
   Date: 7/10/26
******************************************************************************/

//! Pagination shared by every listing endpoint
//!
//! A listing is fetched one [`PagedSet`] at a time. The cursor handed back in
//! `next_page` is opaque to callers: pass it verbatim in the next
//! [`PageRequest`] or stop. [`paginate`] turns a page fetcher into a lazy
//! stream of items.

use crate::error::AppError;
use futures::stream::{self, BoxStream, StreamExt, TryStreamExt};
use serde::Serialize;
use std::future::Future;
use tracing::debug;

/// One page of a larger listing
///
/// `has_more` is derived from `next_page`, so the two can never disagree.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PagedSet<T> {
    results: Vec<T>,
    has_more: bool,
    total: u64,
    next_page: Option<String>,
}

impl<T> PagedSet<T> {
    /// Creates a page; `has_more` is true exactly when `next_page` is present
    pub fn new(results: Vec<T>, total: u64, next_page: Option<String>) -> Self {
        Self {
            results,
            has_more: next_page.is_some(),
            total,
            next_page,
        }
    }

    /// Page of an empty listing
    #[must_use]
    pub fn empty() -> Self {
        Self::new(Vec::new(), 0, None)
    }

    /// Items on this page, in server order
    #[must_use]
    pub fn results(&self) -> &[T] {
        &self.results
    }

    /// Whether another page can be requested
    #[must_use]
    pub fn has_more(&self) -> bool {
        self.has_more
    }

    /// Total number of items in the whole listing
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Cursor for the next page
    #[must_use]
    pub fn next_page(&self) -> Option<&str> {
        self.next_page.as_deref()
    }

    /// Number of items on this page
    #[must_use]
    pub fn len(&self) -> usize {
        self.results.len()
    }

    /// True if this page carries no items
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Consumes the page, returning its items
    #[must_use]
    pub fn into_results(self) -> Vec<T> {
        self.results
    }
}

/// Arguments of a single page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// Requested number of items; servers may return fewer
    pub page_size: u32,
    /// Cursor from the previous page, None for the first page
    pub cursor: Option<String>,
}

impl PageRequest {
    /// Request for the first page
    #[must_use]
    pub fn first(page_size: u32) -> Self {
        Self {
            page_size: page_size.max(1),
            cursor: None,
        }
    }

    /// Request for the page following `cursor`
    #[must_use]
    pub fn next(page_size: u32, cursor: impl Into<String>) -> Self {
        Self {
            page_size: page_size.max(1),
            cursor: Some(cursor.into()),
        }
    }

    /// True for the first page
    #[must_use]
    pub fn is_first(&self) -> bool {
        self.cursor.is_none()
    }
}

enum Position {
    Start,
    Next(String),
    Done,
}

struct Walk<F> {
    fetch: F,
    position: Position,
    consumed: u64,
    pages: u64,
}

/// Lazily walks a listing page by page and yields its items in server order
///
/// Pages are fetched only as the stream is polled. The walk stops once a page
/// has no `next_page`, once the items consumed reach the page's `total`, or
/// when a page comes back empty. The first error ends the stream. Each call
/// starts a fresh walk from the first page.
pub fn paginate<'a, T, F, Fut>(page_size: u32, fetch: F) -> BoxStream<'a, Result<T, AppError>>
where
    T: Send + 'a,
    F: FnMut(PageRequest) -> Fut + Send + 'a,
    Fut: Future<Output = Result<PagedSet<T>, AppError>> + Send + 'a,
{
    let walk = Walk {
        fetch,
        position: Position::Start,
        consumed: 0,
        pages: 0,
    };

    stream::try_unfold(walk, move |mut walk| async move {
        let request = match std::mem::replace(&mut walk.position, Position::Done) {
            Position::Start => PageRequest::first(page_size),
            Position::Next(cursor) => PageRequest::next(page_size, cursor),
            Position::Done => return Ok(None),
        };

        let page = match (walk.fetch)(request).await {
            Ok(page) => page,
            Err(e) => return Err(e),
        };
        walk.pages += 1;
        walk.consumed += page.len() as u64;
        debug!(
            "Fetched page {} with {} items ({} of {})",
            walk.pages,
            page.len(),
            walk.consumed,
            page.total()
        );

        if walk.consumed < page.total() && !page.is_empty() {
            if let Some(next) = page.next_page() {
                walk.position = Position::Next(next.to_string());
            }
        }

        Ok(Some((page.into_results(), walk)))
    })
    .map_ok(|items| stream::iter(items.into_iter().map(Ok)))
    .try_flatten()
    .boxed()
}
