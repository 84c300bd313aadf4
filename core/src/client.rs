//! Request builder and response parser for the CRM objects API.
//!
//! # Design
//! `ObjectClient` holds an immutable `ClientConfig`, the `ObjectResource`
//! that decides its base URL, and a `Transport`. Each operation is split into
//! a pure `build_*` step producing an `HttpRequest` and a `parse_response`
//! step consuming the `HttpResponse`; `search` and `update` run both around
//! exactly one `Transport::execute` call. Nothing is retried.

use log::{debug, warn};
use serde::Serialize;

use crate::config::ClientConfig;
use crate::error::{IntegrationError, Result};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::resource::ObjectResource;
use crate::transport::{Transport, UreqTransport};
use crate::types::{ApiResult, SearchRequest, UpdateRequest};

/// Query parameter carrying the API key.
pub const API_KEY_PARAM: &str = "hapikey";

const SEARCH_ENDPOINT: &str = "search";

/// Search/update client for one CRM object type.
///
/// Holds the validated config, the resource that decides the base URL, and
/// the transport every request goes through. Carries no state between calls.
#[derive(Debug, Clone)]
pub struct ObjectClient<R, T = UreqTransport> {
    config: ClientConfig,
    resource: R,
    transport: T,
}

impl<R: ObjectResource> ObjectClient<R, UreqTransport> {
    pub fn new(config: ClientConfig, resource: R) -> Self {
        let transport = UreqTransport::new(&config);
        Self::with_transport(config, resource, transport)
    }
}

impl<R: ObjectResource, T: Transport> ObjectClient<R, T> {
    pub fn with_transport(config: ClientConfig, resource: R, transport: T) -> Self {
        Self {
            config,
            resource,
            transport,
        }
    }

    /// Collection URL for this client's object type.
    pub fn base_url(&self) -> String {
        format!("{}{}", self.config.api_root(), self.resource.path_segment())
    }

    pub fn build_search(&self, request: &SearchRequest) -> Result<HttpRequest> {
        self.build_json(
            HttpMethod::Post,
            format!("{}{SEARCH_ENDPOINT}", self.base_url()),
            request,
        )
    }

    pub fn build_update(&self, request: &UpdateRequest) -> Result<HttpRequest> {
        self.build_json(
            HttpMethod::Patch,
            format!("{}{}", self.base_url(), request.object_id()),
            request,
        )
    }

    /// Map a response to its decoded JSON object, or to an
    /// `IntegrationError` for any non-2xx status.
    pub fn parse_response(&self, response: HttpResponse) -> Result<ApiResult> {
        if !response.is_success() {
            let err = IntegrationError::from_status(response.status, &response.body);
            warn!("{err}");
            return Err(err);
        }
        decode_object(&response.body)
    }

    pub fn search(&self, request: &SearchRequest) -> Result<ApiResult> {
        let http = self.build_search(request)?;
        self.send(http)
    }

    pub fn update(&self, request: &UpdateRequest) -> Result<ApiResult> {
        let http = self.build_update(request)?;
        self.send(http)
    }

    fn send(&self, request: HttpRequest) -> Result<ApiResult> {
        debug!("{} {}", request.method.as_str(), request.url);
        let response = self.transport.execute(&request).map_err(|e| {
            let err = IntegrationError::request_failed(e);
            warn!("{err}");
            err
        })?;
        debug!("{} {} -> {}", request.method.as_str(), request.url, response.status);
        self.parse_response(response)
    }

    fn build_json<B: Serialize>(&self, method: HttpMethod, url: String, body: &B) -> Result<HttpRequest> {
        let body = serde_json::to_string(body)
            .map_err(|e| IntegrationError::with_source("API Request could not be encoded.", e))?;
        Ok(HttpRequest {
            method,
            url,
            query: vec![(API_KEY_PARAM.to_string(), self.config.api_key().to_string())],
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Decode a success body. An empty body or JSON `null` decodes to an empty
/// object; any other non-object JSON is an error.
fn decode_object(body: &str) -> Result<ApiResult> {
    if body.trim().is_empty() {
        return Ok(ApiResult::new());
    }
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| IntegrationError::with_source("API Response could not be decoded.", e))?;
    match value {
        serde_json::Value::Object(map) => Ok(map),
        serde_json::Value::Null => Ok(ApiResult::new()),
        _ => Err(IntegrationError::new("API Response is not a JSON object.")),
    }
}
