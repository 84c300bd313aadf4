//! HTTP request/response types exchanged with a `Transport`.
//!
//! # Design
//! Requests and responses are plain data. `ObjectClient` builds an
//! `HttpRequest`, a `Transport` executes it, and the resulting
//! `HttpResponse` is handed back for status and body interpretation. Callers
//! that want to run the I/O themselves can use the `build_*` and
//! `parse_response` methods directly.
//!
//! Query parameters are kept separate from `url` so the API key never ends
//! up in a logged URL.

use std::fmt;

use crate::client::API_KEY_PARAM;

/// HTTP method for a request. The objects API only needs these two.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Post,
    Patch,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Post => "POST",
            HttpMethod::Patch => "PATCH",
        }
    }
}

/// Placeholder printed instead of the API key in `Debug` output.
pub const REDACTED: &str = "<redacted>";

/// An HTTP request described as plain data.
///
/// `Debug` output redacts the API key query parameter.
#[derive(Clone)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub query: Vec<(String, String)>,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the first query parameter named `name`.
    pub fn query_param(&self, name: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

impl fmt::Debug for HttpRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let query: Vec<(&str, &str)> = self
            .query
            .iter()
            .map(|(key, value)| {
                let value = if key == API_KEY_PARAM { REDACTED } else { value.as_str() };
                (key.as_str(), value)
            })
            .collect();
        f.debug_struct("HttpRequest")
            .field("method", &self.method)
            .field("url", &self.url)
            .field("query", &query)
            .field("headers", &self.headers)
            .field("body", &self.body)
            .finish()
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
