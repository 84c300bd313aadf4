//! Synchronous client for HubSpot's CRM v3 companies API.
//!
//! # Overview
//! Two operations are supported: finding a company by exact-match filter and
//! updating a company's properties. Requests are authenticated with an API
//! key passed as the `hapikey` query parameter.
//!
//! # Design
//! - `ObjectClient` shapes search/update requests for any object type and
//!   normalizes every failure into `IntegrationError`. The object type is an
//!   `ObjectResource` supplying the URL segment.
//! - `CompaniesClient` adds company field validation (`fields`) and the
//!   high-level `find_company` / `update_company` operations.
//! - I/O goes through the `Transport` trait; `UreqTransport` is the default.
//!   `build_*` / `parse_response` are public so callers can run the round
//!   trip themselves.
//!
//! ```no_run
//! use hubspot_core::{ClientConfig, CompaniesClient};
//! use serde_json::json;
//!
//! # fn main() -> hubspot_core::Result<()> {
//! let client = CompaniesClient::new(ClientConfig::new("my-api-key")?);
//! let filter = json!({"merchant_id": "42"});
//! if let Some(id) = client.find_company(filter.as_object().unwrap())? {
//!     println!("company {id}");
//! }
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod companies;
pub mod config;
pub mod error;
pub mod fields;
pub mod http;
pub mod resource;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use client::ObjectClient;
pub use companies::CompaniesClient;
pub use config::ClientConfig;
pub use error::{IntegrationError, Result};
pub use fields::validate_and_filter_properties;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use resource::{Companies, ObjectResource, Objects};
pub use transport::{Transport, TransportError, UreqTransport};
pub use types::{ApiResult, Properties, SearchRequest, Sort, SortDirection, UpdateRequest};
