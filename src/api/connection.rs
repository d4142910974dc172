//! Typed requests over a [`Connection`]
//!
//! Every endpoint method funnels into [`ApiConnection::request`] for single
//! values or [`ApiConnection::get_all`] for paginated collections.

use crate::error::{Error, Result};
use crate::http::{ApiRequest, ApiResponse, Connection};
use crate::pagination::{paginate, ApiOptions, Cursor, Page, PageStream};
use crate::types::{Method, StringMap};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use tracing::debug;

/// Shared handle to a transport with typed request helpers
#[derive(Clone)]
pub struct ApiConnection {
    connection: Arc<dyn Connection>,
}

impl ApiConnection {
    /// Wrap a transport
    pub fn new(connection: Arc<dyn Connection>) -> Self {
        Self { connection }
    }

    /// Get the underlying transport
    pub fn connection(&self) -> &Arc<dyn Connection> {
        &self.connection
    }

    /// Send a request and decode the JSON response
    pub async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: StringMap,
        body: Option<Value>,
    ) -> Result<T> {
        let mut request = ApiRequest::new(method, path).with_query(query);
        request.body = body;
        let response = self.connection.send(request).await?;
        decode(&response)
    }

    /// GET a single resource
    pub async fn get<T: DeserializeOwned>(&self, path: &str, query: StringMap) -> Result<T> {
        self.request(Method::GET, path, query, None).await
    }

    /// POST a JSON body
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::POST, path, StringMap::new(), Some(body))
            .await
    }

    /// PATCH a JSON body
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T> {
        let body = serde_json::to_value(body)?;
        self.request(Method::PATCH, path, StringMap::new(), Some(body))
            .await
    }

    /// PUT with an optional body, ignoring any response body
    pub async fn put_empty(&self, path: &str, body: Option<Value>) -> Result<()> {
        let mut request = ApiRequest::new(Method::PUT, path);
        request.body = body;
        self.connection.send(request).await?;
        Ok(())
    }

    /// DELETE a resource
    pub async fn delete(&self, path: &str) -> Result<()> {
        self.connection
            .send(ApiRequest::new(Method::DELETE, path))
            .await?;
        Ok(())
    }

    /// Fetch one page of a collection
    ///
    /// The body must be a JSON array; the next cursor comes from the Link
    /// header.
    pub async fn get_page<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<Page<T>> {
        let response = self.connection.send(request).await?;
        let items: Vec<T> = decode(&response)?;
        let next = response.next_link().map(Cursor::new);
        Ok(Page::new(items, next))
    }

    /// Lazily stream every item of a collection
    ///
    /// The first request carries `query` plus the page size and start page
    /// from `options`. Later requests follow the Link header URL verbatim,
    /// which already encodes those parameters.
    pub fn get_all<T>(&self, path: &str, query: StringMap, options: &ApiOptions) -> PageStream<T>
    where
        T: DeserializeOwned + Send + 'static,
    {
        let api = self.clone();
        let mut first = query;
        first.extend(options.query_params());
        let path = path.to_string();

        debug!("Streaming {path}");
        let stream = paginate(move |cursor: Option<Cursor>| {
            let api = api.clone();
            let request = match cursor {
                None => ApiRequest::get(path.as_str()).with_query(first.clone()),
                Some(next) => ApiRequest::get(next.into_inner()),
            };
            async move { api.get_page(request).await }
        });

        match options.page_count {
            Some(count) => stream.with_max_pages(count),
            None => stream,
        }
    }
}

impl std::fmt::Debug for ApiConnection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiConnection").finish_non_exhaustive()
    }
}

/// Decode a JSON response body
///
/// An empty body (204 No Content) decodes as JSON `null`, so `()` and
/// `Option<T>` targets accept it.
fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T> {
    let text = if response.is_empty() {
        "null"
    } else {
        response.body.as_str()
    };
    serde_json::from_str(text).map_err(|e| {
        Error::decode(format!(
            "unexpected response body (status {}): {e}",
            response.status
        ))
    })
}

/// Flatten a request filter struct into query parameters
///
/// `null` fields are skipped, arrays are joined with `,`, and scalars use
/// their plain string form.
pub fn to_query<S: Serialize + ?Sized>(filter: &S) -> Result<StringMap> {
    let value = serde_json::to_value(filter)?;
    let Value::Object(fields) = value else {
        return Err(Error::invalid_argument(
            "filter",
            "request filters must serialize to an object",
        ));
    };

    let mut params = StringMap::new();
    for (key, value) in fields {
        if let Some(rendered) = render_query_value(&value) {
            params.insert(key, rendered);
        }
    }
    Ok(params)
}

fn render_query_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(render_query_value).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(","))
            }
        }
        Value::Object(_) => Some(value.to_string()),
    }
}
