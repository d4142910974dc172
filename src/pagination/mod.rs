//! Pagination module
//!
//! Flattens paginated resources into lazy item streams.
//!
//! # Overview
//!
//! A paginated endpoint is described by a page-fetch function: given the
//! cursor of the previous page (or `None`), it returns the next [`Page`].
//! [`paginate`] wraps that function in a [`PageStream`], which
//!
//! - yields items in page order, then in order within a page
//! - fetches a page only once every item of the previous page was consumed
//! - ends with the first fetch error, after the items of earlier pages
//! - never fetches again once dropped, cancelled, or terminated
//!
//! [`subscribe`] drives a stream into an [`Observer`] for push-style
//! consumers.

mod observe;
mod stream;
mod types;

pub use observe::{subscribe, Completion, Flow, Observer};
pub use stream::{paginate, PageFuture, PageStream};
pub use types::{ApiOptions, Cursor, Page, StreamState};
