//! In-memory transports for unit tests.

use std::cell::RefCell;

use serde_json::Value;

use crate::http::{HttpRequest, HttpResponse};
use crate::transport::{Transport, TransportError};
use crate::types::Properties;

/// Returns a canned response and records every request it receives.
#[derive(Debug)]
pub struct RecordingTransport {
    status: u16,
    body: String,
    requests: RefCell<Vec<HttpRequest>>,
}

impl RecordingTransport {
    pub fn new(status: u16, body: &str) -> Self {
        Self {
            status,
            body: body.to_string(),
            requests: RefCell::new(Vec::new()),
        }
    }

    pub fn ok(body: &str) -> Self {
        Self::new(200, body)
    }

    pub fn calls(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn last_body(&self) -> Value {
        let requests = self.requests.borrow();
        let body = requests
            .last()
            .and_then(|req| req.body.as_deref())
            .expect("no request with a body was recorded");
        serde_json::from_str(body).unwrap()
    }
}

impl Transport for RecordingTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.requests.borrow_mut().push(request.clone());
        Ok(HttpResponse {
            status: self.status,
            headers: Vec::new(),
            body: self.body.clone(),
        })
    }
}

/// Fails every request as if the connection could not be made.
pub struct FailingTransport;

impl Transport for FailingTransport {
    fn execute(&self, _request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        Err("connection refused".into())
    }
}

pub fn object(value: Value) -> Properties {
    match value {
        Value::Object(map) => map,
        other => panic!("expected a JSON object, got {other}"),
    }
}
