//! Company lookups and updates.
//!
//! # Design
//! `CompaniesClient` wraps an `ObjectClient` bound to the `Companies`
//! resource. Input is validated and filtered by `fields` before anything is
//! sent, so invalid input never costs a round trip. "Not found" is `None`,
//! not an error.

use log::debug;
use serde_json::Value;

use crate::client::ObjectClient;
use crate::config::ClientConfig;
use crate::error::{IntegrationError, Result};
use crate::fields::{is_empty_value, validate_and_filter_properties};
use crate::resource::Companies;
use crate::transport::{Transport, UreqTransport};
use crate::types::{Properties, SearchRequest, Sort, UpdateRequest};

/// Client for the companies object: `find_company` and `update_company`.
///
/// Both operations validate and filter their input before any request is
/// sent.
#[derive(Debug, Clone)]
pub struct CompaniesClient<T = UreqTransport> {
    inner: ObjectClient<Companies, T>,
}

impl CompaniesClient<UreqTransport> {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            inner: ObjectClient::new(config, Companies),
        }
    }

    /// Build a client from an in-memory mapping such as `{"api_key": "..."}`.
    pub fn from_value(config: Value) -> Result<Self> {
        Ok(Self::new(ClientConfig::from_value(config)?))
    }
}

impl<T: Transport> CompaniesClient<T> {
    pub fn with_transport(config: ClientConfig, transport: T) -> Self {
        Self {
            inner: ObjectClient::with_transport(config, Companies, transport),
        }
    }

    pub fn base_url(&self) -> String {
        self.inner.base_url()
    }

    /// Find the first company matching `filter`, ordered by id.
    ///
    /// `filter` must contain a non-empty `merchant_id`. Returns `None` when
    /// nothing matches.
    pub fn find_company(&self, filter: &Properties) -> Result<Option<String>> {
        if filter.get("merchant_id").map_or(true, is_empty_value) {
            return Err(IntegrationError::new("`merchant_id` is required!"));
        }

        let conditions = validate_and_filter_properties(filter)?;
        let request = SearchRequest::new(
            &conditions,
            vec![Sort::ascending("id")],
            vec!["id".to_string()],
        )?;
        let response = self.inner.search(&request)?;

        let first = match response
            .get("results")
            .and_then(Value::as_array)
            .and_then(|results| results.first())
        {
            Some(first) => first,
            None => {
                debug!("no company matched {conditions:?}");
                return Ok(None);
            }
        };

        let id = match first.get("id") {
            Some(Value::String(id)) => id.clone(),
            Some(Value::Number(id)) => id.to_string(),
            _ => {
                return Err(IntegrationError::new(
                    "API Response is missing the company id.",
                ))
            }
        };
        debug!("found company {id}");
        Ok(Some(id))
    }

    /// Update a company's properties and return the properties the API
    /// reports back, or `None` when the response carries none.
    pub fn update_company(&self, company_id: i64, properties: &Properties) -> Result<Option<Properties>> {
        let company_id = match u64::try_from(company_id) {
            Ok(id) if id > 0 => id,
            _ => return Err(IntegrationError::new("Bad Company ID provided!")),
        };

        let properties = validate_and_filter_properties(properties)?;
        let mut response = self
            .inner
            .update(&UpdateRequest::new(company_id, properties))?;

        match response.remove("properties") {
            Some(Value::Object(updated)) => Ok(Some(updated)),
            _ => Ok(None),
        }
    }
}
