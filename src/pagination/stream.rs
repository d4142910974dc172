//! Lazy page-by-page item stream
//!
//! `PageStream` turns a page-fetch function into a `Stream` of items.
//! Pages are requested only when the consumer polls past the last buffered
//! item, so there is never more than one fetch in flight and nothing is
//! requested after the consumer stops polling.

use super::types::{Cursor, Page, StreamState};
use crate::error::Result;
use futures::future::BoxFuture;
use futures::ready;
use futures::stream::{FusedStream, Stream};
use pin_project_lite::pin_project;
use std::collections::VecDeque;
use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use tokio_util::sync::{CancellationToken, WaitForCancellationFutureOwned};
use tracing::{debug, warn};

/// Boxed future resolving to one page
pub type PageFuture<T> = BoxFuture<'static, Result<Page<T>>>;

type FetchPage<T> = Box<dyn FnMut(Option<Cursor>) -> PageFuture<T> + Send>;

pin_project! {
    /// Stream of items flattened from a paginated resource
    ///
    /// Created with [`paginate`] or [`PageStream::new`]. Dropping the stream
    /// drops any in-flight fetch and releases all buffered items.
    #[must_use = "streams do nothing unless polled"]
    pub struct PageStream<T> {
        fetch: FetchPage<T>,
        buffered: VecDeque<T>,
        next_cursor: Option<Cursor>,
        in_flight: Option<PageFuture<T>>,
        cancel: Option<Pin<Box<WaitForCancellationFutureOwned>>>,
        state: StreamState,
        pages_fetched: u32,
        max_pages: Option<u32>,
    }
}

impl<T: Send + 'static> PageStream<T> {
    /// Create a stream from a page-fetch function
    ///
    /// `fetch` receives `None` for the first page and the previous page's
    /// cursor afterwards. It is not called until the stream is first polled.
    pub fn new<F, Fut>(mut fetch: F) -> Self
    where
        F: FnMut(Option<Cursor>) -> Fut + Send + 'static,
        Fut: Future<Output = Result<Page<T>>> + Send + 'static,
    {
        Self {
            fetch: Box::new(move |cursor| -> PageFuture<T> { Box::pin(fetch(cursor)) }),
            buffered: VecDeque::new(),
            next_cursor: None,
            in_flight: None,
            cancel: None,
            state: StreamState::NotStarted,
            pages_fetched: 0,
            max_pages: None,
        }
    }
}

impl<T> PageStream<T> {
    /// Stop after `max` pages even if the server reports more
    #[must_use]
    pub fn with_max_pages(mut self, max: u32) -> Self {
        self.max_pages = Some(max);
        self
    }

    /// End the stream as soon as `token` is cancelled
    ///
    /// The token is observed on every poll, including while a page fetch is
    /// in flight. A cancelled in-flight fetch is dropped and its page
    /// discarded.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = Some(Box::pin(token.cancelled_owned()));
        self
    }

    /// Current lifecycle state
    pub fn state(&self) -> StreamState {
        self.state
    }

    /// Number of pages fetched successfully so far
    pub fn pages_fetched(&self) -> u32 {
        self.pages_fetched
    }
}

/// Build a lazy item stream over a paginated resource
///
/// Items are yielded in page order, then in order within each page. The
/// stream ends after a page without a cursor, or with the first fetch error.
pub fn paginate<T, F, Fut>(fetch: F) -> PageStream<T>
where
    T: Send + 'static,
    F: FnMut(Option<Cursor>) -> Fut + Send + 'static,
    Fut: Future<Output = Result<Page<T>>> + Send + 'static,
{
    PageStream::new(fetch)
}

fn cancel_requested(
    cancel: &mut Option<Pin<Box<WaitForCancellationFutureOwned>>>,
    cx: &mut Context<'_>,
) -> bool {
    match cancel {
        Some(fut) => fut.as_mut().poll(cx).is_ready(),
        None => false,
    }
}

impl<T> Stream for PageStream<T> {
    type Item = Result<T>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        loop {
            if this.state.is_terminal() {
                return Poll::Ready(None);
            }

            if cancel_requested(this.cancel, cx) {
                if this.in_flight.take().is_some() {
                    warn!(
                        "Stream cancelled during fetch of page {}, discarding response",
                        *this.pages_fetched + 1
                    );
                }
                this.buffered.clear();
                *this.next_cursor = None;
                *this.state = StreamState::Cancelled;
                debug!("Stream cancelled after {} pages", this.pages_fetched);
                return Poll::Ready(None);
            }

            if let Some(item) = this.buffered.pop_front() {
                *this.state = StreamState::EmittingItems;
                return Poll::Ready(Some(Ok(item)));
            }

            if this.in_flight.is_none() {
                if matches!(*this.max_pages, Some(max) if *this.pages_fetched >= max) {
                    debug!("Page limit reached after {} pages", this.pages_fetched);
                    *this.next_cursor = None;
                    *this.state = StreamState::Completed;
                    return Poll::Ready(None);
                }

                let cursor = if *this.state == StreamState::NotStarted {
                    None
                } else if let Some(cursor) = this.next_cursor.take() {
                    Some(cursor)
                } else {
                    debug!("Stream completed after {} pages", this.pages_fetched);
                    *this.state = StreamState::Completed;
                    return Poll::Ready(None);
                };

                debug!("Fetching page {}", *this.pages_fetched + 1);
                *this.in_flight = Some((this.fetch)(cursor));
                *this.state = StreamState::FetchingPage;
            }

            if let Some(fetch) = this.in_flight.as_mut() {
                let result = ready!(fetch.as_mut().poll(cx));
                *this.in_flight = None;

                match result {
                    Ok(page) => {
                        *this.pages_fetched += 1;
                        debug!(
                            "Page {}: {} items, more pages: {}",
                            this.pages_fetched,
                            page.items.len(),
                            page.next.is_some()
                        );
                        *this.next_cursor = page.next;
                        this.buffered.extend(page.items);
                        *this.state = StreamState::EmittingItems;
                    }
                    Err(e) => {
                        debug!("Fetch of page {} failed: {e}", *this.pages_fetched + 1);
                        *this.next_cursor = None;
                        *this.state = StreamState::Failed;
                        return Poll::Ready(Some(Err(e)));
                    }
                }
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.state.is_terminal() {
            (0, Some(0))
        } else {
            (self.buffered.len(), None)
        }
    }
}

impl<T> FusedStream for PageStream<T> {
    fn is_terminated(&self) -> bool {
        self.state.is_terminal()
    }
}

impl<T> fmt::Debug for PageStream<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PageStream")
            .field("state", &self.state)
            .field("buffered", &self.buffered.len())
            .field("pages_fetched", &self.pages_fetched)
            .field("max_pages", &self.max_pages)
            .field("cancellable", &self.cancel.is_some())
            .finish_non_exhaustive()
    }
}
