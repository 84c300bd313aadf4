//! Verify client behaviour against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, the expected outgoing request, a
//! simulated response, and the expected result or error message. Bodies are
//! compared as parsed JSON, not raw strings.

use std::cell::RefCell;

use hubspot_core::{
    ClientConfig, Companies, CompaniesClient, HttpMethod, HttpRequest, HttpResponse, ObjectClient,
    Transport, TransportError,
};
use serde_json::Value;

const BASE_URL: &str = "https://api.hubapi.com/crm/v3/objects";
const API_KEY: &str = "vector-key";

/// Replays one simulated response and keeps the request it was given.
struct VectorTransport {
    response: Option<HttpResponse>,
    seen: RefCell<Vec<HttpRequest>>,
}

impl VectorTransport {
    fn new(case: &Value) -> Self {
        let response = case.get("simulated_response").map(|sim| HttpResponse {
            status: sim["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: sim["body"].as_str().unwrap().to_string(),
        });
        Self {
            response,
            seen: RefCell::new(Vec::new()),
        }
    }
}

impl Transport for VectorTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.seen.borrow_mut().push(request.clone());
        self.response
            .clone()
            .ok_or_else(|| "vector has no simulated response".into())
    }
}

fn config() -> ClientConfig {
    ClientConfig::new(API_KEY).unwrap()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "POST" => HttpMethod::Post,
        "PATCH" => HttpMethod::Patch,
        other => panic!("unknown method: {other}"),
    }
}

/// Compare the recorded request with `expected_request`, or check that no
/// request was sent when the vector has none.
fn check_request(name: &str, case: &Value, transport: &VectorTransport) {
    let seen = transport.seen.borrow();
    let Some(expected) = case.get("expected_request") else {
        assert!(seen.is_empty(), "{name}: no request expected");
        return;
    };
    assert_eq!(seen.len(), 1, "{name}: exactly one request");
    let req = &seen[0];

    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(req.url, format!("{BASE_URL}{}", expected["path"].as_str().unwrap()), "{name}: url");

    let expected_query: Vec<(String, String)> = expected["query"]
        .as_array()
        .unwrap()
        .iter()
        .map(|pair| {
            let arr = pair.as_array().unwrap();
            (arr[0].as_str().unwrap().to_string(), arr[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.query, expected_query, "{name}: query");

    let body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, expected["body"], "{name}: body");
}

// ---------------------------------------------------------------------------
// Find
// ---------------------------------------------------------------------------

#[test]
fn find_company_test_vectors() {
    let raw = include_str!("../../test-vectors/find_company.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let input = case["input"].as_object().unwrap();
        let transport = VectorTransport::new(case);
        let client = CompaniesClient::with_transport(config(), &transport);

        let result = client.find_company(input);
        check_request(name, case, &transport);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(err.message(), expected_error.as_str().unwrap(), "{name}: error");
        } else {
            let found = result.unwrap();
            let expected = case["expected_result"].as_str().map(str::to_string);
            assert_eq!(found, expected, "{name}: result");
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_company_test_vectors() {
    let raw = include_str!("../../test-vectors/update_company.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let id = case["input_id"].as_i64().unwrap();
        let input = case["input"].as_object().unwrap();
        let transport = VectorTransport::new(case);
        let client = CompaniesClient::with_transport(config(), &transport);

        let result = client.update_company(id, input);
        check_request(name, case, &transport);

        if let Some(expected_error) = case.get("expected_error") {
            let err = result.unwrap_err();
            assert_eq!(err.message(), expected_error.as_str().unwrap(), "{name}: error");
        } else {
            let updated = result.unwrap();
            let expected = case["expected_result"].as_object().cloned();
            assert_eq!(updated, expected, "{name}: result");
        }
    }
}

// ---------------------------------------------------------------------------
// Error normalisation
// ---------------------------------------------------------------------------

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: Value = serde_json::from_str(raw).unwrap();

    let client = ObjectClient::with_transport(config(), Companies, VectorTransport::new(&Value::Null));
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = HttpResponse {
            status: case["status"].as_u64().unwrap() as u16,
            headers: Vec::new(),
            body: case["body"].as_str().unwrap().to_string(),
        };

        let err = client.parse_response(response).unwrap_err();
        assert_eq!(
            err.message(),
            case["expected_message"].as_str().unwrap(),
            "{name}: message"
        );
        assert!(
            err.to_string().starts_with("HubSpot Integration Exception: "),
            "{name}: prefix"
        );
    }
}
