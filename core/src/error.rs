//! Error type for the HubSpot integration.
//!
//! # Design
//! Every failure the client can produce (bad configuration, invalid input,
//! transport failure, an error reported by the API) surfaces as one
//! `IntegrationError`. Callers that need detail inspect `message()` or walk
//! the `source()` chain; there are no variants to match on.

use serde_json::Value;

use crate::fields::is_empty_value;

/// Prefix carried by every `IntegrationError` message.
pub const MESSAGE_PREFIX: &str = "HubSpot Integration Exception: ";

/// Boxed underlying cause attached to an `IntegrationError`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

pub type Result<T> = std::result::Result<T, IntegrationError>;

/// The single error kind returned by this crate.
#[derive(Debug, thiserror::Error)]
#[error("{}{}", MESSAGE_PREFIX, .message)]
pub struct IntegrationError {
    message: String,
    #[source]
    source: Option<BoxError>,
}

impl IntegrationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(message: impl Into<String>, source: impl Into<BoxError>) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// The message without the integration prefix.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Build the error for a request that never produced a usable response,
    /// or whose error body carried no API detail.
    pub fn request_failed(source: impl Into<BoxError>) -> Self {
        let source = source.into();
        Self {
            message: format!("API Request Failed. Details: {source}"),
            source: Some(source),
        }
    }

    /// Build the error for a non-2xx response.
    ///
    /// Uses the HubSpot error body when it parses and names a `status`;
    /// otherwise falls back to the generic request-failed message.
    pub fn from_status(status: u16, body: &str) -> Self {
        let cause = HttpStatusError {
            status,
            body: body.to_string(),
        };
        match ApiErrorDetail::parse(body) {
            Some(detail) => Self::with_source(
                format!(
                    "API Returned Error [{}]: {} (correlationId:{})",
                    detail.status, detail.message, detail.correlation_id
                ),
                cause,
            ),
            None => Self::request_failed(cause),
        }
    }
}

/// Underlying cause for a response with a non-success status.
#[derive(Debug, thiserror::Error)]
#[error("server responded with HTTP {status}: {body}")]
pub struct HttpStatusError {
    pub status: u16,
    pub body: String,
}

/// Error body returned by HubSpot, e.g.
/// `{"status":"error","message":"...","correlationId":"...","category":"..."}`.
///
/// Fields may be any JSON type; they are rendered as text, with `null` or a
/// missing field rendering as an empty string.
#[derive(Debug)]
struct ApiErrorDetail {
    status: String,
    message: String,
    correlation_id: String,
}

impl ApiErrorDetail {
    /// `None` unless the body is a JSON object with a non-empty `status`.
    fn parse(body: &str) -> Option<Self> {
        let value: Value = serde_json::from_str(body).ok()?;
        let detail = value.as_object()?;
        let status = detail.get("status").filter(|s| !is_empty_value(s))?;
        Some(Self {
            status: render(Some(status)),
            message: render(detail.get("message")),
            correlation_id: render(detail.get("correlationId")),
        })
    }
}

fn render(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(other) => other.to_string(),
    }
}
