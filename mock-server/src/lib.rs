use std::{
    cmp::Ordering,
    collections::{BTreeMap, HashMap},
    sync::Arc,
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{patch, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use uuid::Uuid;

const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: usize = 100;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Company {
    pub id: u64,
    pub properties: BTreeMap<String, String>,
}

impl Company {
    pub fn new(id: u64, properties: &[(&str, &str)]) -> Self {
        Self {
            id,
            properties: properties
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Property value as seen by search; `id` is always available.
    fn property(&self, name: &str) -> Option<String> {
        if name == "id" || name == "hs_object_id" {
            return Some(self.id.to_string());
        }
        self.properties.get(name).cloned()
    }
}

/// Object as returned by the search and update endpoints.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectBody {
    pub id: String,
    pub properties: BTreeMap<String, String>,
    pub archived: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResults {
    pub total: usize,
    pub results: Vec<ObjectBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Filter {
    pub property_name: String,
    pub operator: String,
    #[serde(default)]
    pub value: Value,
}

#[derive(Debug, Deserialize)]
pub struct FilterGroup {
    #[serde(default)]
    pub filters: Vec<Filter>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchBody {
    #[serde(default)]
    pub filter_groups: Vec<FilterGroup>,
    /// Either `"name"` or `{"propertyName": "name", "direction": "DESCENDING"}`.
    #[serde(default)]
    pub sorts: Vec<Value>,
    #[serde(default)]
    pub properties: Vec<String>,
    #[serde(default)]
    pub limit: Option<usize>,
    /// Offset, sent as a number or a numeric string.
    #[serde(default)]
    pub after: Option<Value>,
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateBody {
    pub properties: Map<String, Value>,
}

/// HubSpot-shaped error body.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub status: String,
    pub message: String,
    pub correlation_id: String,
    pub category: String,
}

#[derive(Debug)]
pub struct ApiError {
    code: StatusCode,
    category: &'static str,
    message: String,
}

impl ApiError {
    fn new(code: StatusCode, category: &'static str, message: impl Into<String>) -> Self {
        Self {
            code,
            category,
            message: message.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorBody {
            status: "error".to_string(),
            message: self.message,
            correlation_id: Uuid::new_v4().to_string(),
            category: self.category.to_string(),
        };
        log::warn!("{} {}: {}", self.code, body.category, body.message);
        (self.code, Json(body)).into_response()
    }
}

pub type Db = Arc<RwLock<BTreeMap<u64, Company>>>;

#[derive(Clone)]
pub struct AppState {
    api_key: Arc<str>,
    db: Db,
}

impl AppState {
    pub fn new(api_key: &str, companies: Vec<Company>) -> Self {
        let db = companies.into_iter().map(|c| (c.id, c)).collect();
        Self {
            api_key: Arc::from(api_key),
            db: Arc::new(RwLock::new(db)),
        }
    }

    pub fn db(&self) -> Db {
        self.db.clone()
    }

    fn authorize(&self, params: &HashMap<String, String>) -> Result<(), ApiError> {
        match params.get("hapikey") {
            Some(key) if key.as_str() == &*self.api_key => Ok(()),
            _ => Err(ApiError::new(
                StatusCode::UNAUTHORIZED,
                "INVALID_AUTHENTICATION",
                "The API key provided is invalid.",
            )),
        }
    }
}

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/crm/v3/objects/companies/search", post(search_companies))
        .route("/crm/v3/objects/companies/{id}", patch(update_company))
        .with_state(state)
}

pub async fn run(listener: TcpListener, state: AppState) -> Result<(), std::io::Error> {
    axum::serve(listener, app(state)).await
}

async fn search_companies(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<SearchBody>,
) -> Result<Json<SearchResults>, ApiError> {
    state.authorize(&params)?;
    if let Some(filter) = body
        .filter_groups
        .iter()
        .flat_map(|g| &g.filters)
        .find(|f| f.operator != "EQ")
    {
        return Err(ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Unsupported operator {}", filter.operator),
        ));
    }

    let companies = state.db.read().await;
    let mut matched: Vec<&Company> = companies
        .values()
        .filter(|c| matches_groups(c, &body.filter_groups))
        .filter(|c| body.query.as_deref().map_or(true, |q| matches_query(c, q)))
        .collect();

    if let Some((property, descending)) = body.sorts.first().and_then(parse_sort) {
        matched.sort_by(|a, b| {
            let ord = compare_values(a.property(&property), b.property(&property));
            if descending {
                ord.reverse()
            } else {
                ord
            }
        });
    }

    let total = matched.len();
    let after = body.after.as_ref().and_then(parse_offset).unwrap_or(0);
    let limit = body.limit.unwrap_or(DEFAULT_LIMIT).min(MAX_LIMIT);
    let results = matched
        .into_iter()
        .skip(after)
        .take(limit)
        .map(|c| ObjectBody {
            id: c.id.to_string(),
            properties: body
                .properties
                .iter()
                .filter_map(|name| c.property(name).map(|v| (name.clone(), v)))
                .collect(),
            archived: false,
        })
        .collect::<Vec<_>>();

    log::info!("search matched {total}, returning {}", results.len());
    Ok(Json(SearchResults { total, results }))
}

async fn update_company(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
    Json(body): Json<UpdateBody>,
) -> Result<Json<ObjectBody>, ApiError> {
    state.authorize(&params)?;
    let id: u64 = id.parse().map_err(|_| {
        ApiError::new(
            StatusCode::BAD_REQUEST,
            "VALIDATION_ERROR",
            format!("Invalid object id {id}"),
        )
    })?;

    let mut companies = state.db.write().await;
    let company = companies.get_mut(&id).ok_or_else(|| {
        ApiError::new(StatusCode::NOT_FOUND, "OBJECT_NOT_FOUND", "resource not found")
    })?;
    for (name, value) in body.properties {
        company.properties.insert(name, value_to_string(&value));
    }

    log::info!("updated company {id}");
    Ok(Json(ObjectBody {
        id: company.id.to_string(),
        properties: company.properties.clone(),
        archived: false,
    }))
}

/// No groups matches everything; otherwise any group whose filters all match.
fn matches_groups(company: &Company, groups: &[FilterGroup]) -> bool {
    groups.is_empty()
        || groups.iter().any(|group| {
            group
                .filters
                .iter()
                .all(|f| company.property(&f.property_name) == Some(value_to_string(&f.value)))
        })
}

fn matches_query(company: &Company, query: &str) -> bool {
    let query = query.to_lowercase();
    company
        .properties
        .values()
        .any(|v| v.to_lowercase().contains(&query))
}

fn parse_sort(sort: &Value) -> Option<(String, bool)> {
    match sort {
        Value::String(name) => Some((name.clone(), false)),
        Value::Object(sort) => {
            let name = sort.get("propertyName")?.as_str()?.to_string();
            let descending = sort.get("direction").and_then(Value::as_str) == Some("DESCENDING");
            Some((name, descending))
        }
        _ => None,
    }
}

fn parse_offset(after: &Value) -> Option<usize> {
    match after {
        Value::Number(n) => n.as_u64().map(|n| n as usize),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

/// Numeric when both sides parse as numbers, otherwise lexicographic.
/// Missing values sort first.
fn compare_values(a: Option<String>, b: Option<String>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => match (a.parse::<f64>(), b.parse::<f64>()) {
            (Ok(x), Ok(y)) => x.partial_cmp(&y).unwrap_or(Ordering::Equal),
            _ => a.cmp(&b),
        },
        (a, b) => a.is_some().cmp(&b.is_some()),
    }
}

fn value_to_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn company() -> Company {
        Company::new(101, &[("merchant_id", "42"), ("domain", "acme.com")])
    }

    fn groups(value: Value) -> Vec<FilterGroup> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn id_is_always_a_property() {
        assert_eq!(company().property("id").as_deref(), Some("101"));
        assert_eq!(company().property("hs_object_id").as_deref(), Some("101"));
        assert!(company().property("name").is_none());
    }

    #[test]
    fn numeric_filter_value_matches_string_property() {
        let g = groups(json!([{"filters": [{"propertyName": "merchant_id", "operator": "EQ", "value": 42}]}]));
        assert!(matches_groups(&company(), &g));
    }

    #[test]
    fn groups_are_ored_and_filters_anded() {
        let or = groups(json!([
            {"filters": [{"propertyName": "merchant_id", "operator": "EQ", "value": "1"}]},
            {"filters": [{"propertyName": "domain", "operator": "EQ", "value": "acme.com"}]}
        ]));
        assert!(matches_groups(&company(), &or));

        let and = groups(json!([
            {"filters": [
                {"propertyName": "merchant_id", "operator": "EQ", "value": "1"},
                {"propertyName": "domain", "operator": "EQ", "value": "acme.com"}
            ]}
        ]));
        assert!(!matches_groups(&company(), &and));
    }

    #[test]
    fn sorts_accept_strings_and_objects() {
        assert_eq!(parse_sort(&json!("id")), Some(("id".to_string(), false)));
        assert_eq!(
            parse_sort(&json!({"propertyName": "domain", "direction": "DESCENDING"})),
            Some(("domain".to_string(), true))
        );
        assert_eq!(parse_sort(&json!(3)), None);
    }

    #[test]
    fn offsets_accept_numbers_and_strings() {
        assert_eq!(parse_offset(&json!(5)), Some(5));
        assert_eq!(parse_offset(&json!("7")), Some(7));
        assert_eq!(parse_offset(&json!("x")), None);
    }

    #[test]
    fn ids_compare_numerically() {
        assert_eq!(
            compare_values(Some("9".into()), Some("10".into())),
            Ordering::Less
        );
        assert_eq!(compare_values(None, Some("a".into())), Ordering::Less);
    }

    #[test]
    fn query_matches_any_property_case_insensitively() {
        assert!(matches_query(&company(), "ACME"));
        assert!(!matches_query(&company(), "globex"));
    }
}
