//! HTTP transport module
//!
//! Provides the [`Connection`] seam and its default reqwest implementation.
//!
//! # Features
//!
//! - **Pluggable transport**: anything implementing `Connection` can back a client
//! - **GitHub defaults**: media type, API version, user agent, bearer token
//! - **Link headers**: `rel="next"` extraction for pagination
//! - **Typed failures**: status codes mapped to `Unauthorized`, `Forbidden`,
//!   `NotFound`, or `Api` errors

mod client;
mod connection;

pub use client::{
    HttpConnection, HttpConnectionConfig, HttpConnectionConfigBuilder, DEFAULT_API_VERSION,
    DEFAULT_BASE_URL,
};
pub use connection::{parse_link_header, ApiRequest, ApiResponse, Connection};
