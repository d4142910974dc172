//! API connection module
//!
//! A single generic request path, parameterized by HTTP verb, endpoint path,
//! and response type, that all endpoint clients delegate to.

mod connection;

pub use connection::{to_query, ApiConnection};
