//! Request payloads for the CRM objects API.
//!
//! # Design
//! Property values stay as `serde_json::Value` because HubSpot accepts
//! strings and numbers interchangeably and the field rules coerce between
//! them. `Properties` is an insertion-ordered map (`serde_json` is built with
//! `preserve_order`), so filter groups come out in the caller's order.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::{IntegrationError, Result};

/// Property name to value mapping.
pub type Properties = Map<String, Value>;

/// Decoded JSON object returned by the API.
pub type ApiResult = Map<String, Value>;

/// Comparison operator for a search filter. Only exact match is supported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FilterOperator {
    #[serde(rename = "EQ")]
    Equals,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub value: Value,
    pub property_name: String,
    pub operator: FilterOperator,
}

/// Filters inside a group are ANDed; groups are ORed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterGroup {
    pub filters: Vec<Filter>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SortDirection {
    Ascending,
    Descending,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Sort {
    pub property_name: String,
    pub direction: SortDirection,
}

impl Sort {
    pub fn ascending(property_name: &str) -> Self {
        Self {
            property_name: property_name.to_string(),
            direction: SortDirection::Ascending,
        }
    }

    pub fn descending(property_name: &str) -> Self {
        Self {
            property_name: property_name.to_string(),
            direction: SortDirection::Descending,
        }
    }
}

/// Body of `POST <objects>/search`.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchRequest {
    filter_groups: Vec<FilterGroup>,
    sorts: Vec<Sort>,
    properties: Vec<String>,
    limit: u32,
    after: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    query: Option<String>,
}

impl SearchRequest {
    /// Build an exact-match search. Every condition becomes its own filter
    /// group, so multiple conditions match when any one of them does.
    pub fn new(conditions: &Properties, sorts: Vec<Sort>, properties: Vec<String>) -> Result<Self> {
        if conditions.is_empty() {
            return Err(IntegrationError::new("Search Conditions are required!"));
        }
        if sorts.is_empty() {
            return Err(IntegrationError::new("Search Sorts are required!"));
        }
        if properties.is_empty() {
            return Err(IntegrationError::new(
                "Search Return Properties List is required!",
            ));
        }

        let filter_groups = conditions
            .iter()
            .map(|(name, value)| FilterGroup {
                filters: vec![Filter {
                    value: value.clone(),
                    property_name: name.clone(),
                    operator: FilterOperator::Equals,
                }],
            })
            .collect();

        Ok(Self {
            filter_groups,
            sorts,
            properties,
            limit: 1,
            after: 0,
            query: None,
        })
    }

    /// Free-text query. An empty string means no query.
    pub fn query(mut self, query: &str) -> Self {
        self.query = (!query.is_empty()).then(|| query.to_string());
        self
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = limit;
        self
    }

    /// Skip the first `skip` records (sent as `after`).
    pub fn skip(mut self, skip: u32) -> Self {
        self.after = skip;
        self
    }
}

/// Body of `PATCH <objects>/<id>`, plus the id it targets.
#[derive(Debug, Clone, Serialize)]
pub struct UpdateRequest {
    #[serde(skip)]
    object_id: u64,
    properties: Properties,
}

impl UpdateRequest {
    pub fn new(object_id: u64, properties: Properties) -> Self {
        Self {
            object_id,
            properties,
        }
    }

    pub fn object_id(&self) -> u64 {
        self.object_id
    }
}
