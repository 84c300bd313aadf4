//! Update a company's merchant id, risk tags and domain.
//!
//! ```text
//! cargo run -p hubspot-core --example update_company -- \
//!     <api-key> <company-id> <merchant-id> <risk-tag,risk-tag,...> <domain> [api-root]
//! ```
//!
//! Risk tags are given comma-separated and sent joined with `;`.

use std::process::ExitCode;

use hubspot_core::{ClientConfig, CompaniesClient, Properties};
use serde_json::{json, Value};

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [api_key, company_id, merchant_id, risk_tags, domain, rest @ ..] = args.as_slice() else {
        eprintln!(
            "usage: update_company <api-key> <company-id> <merchant-id> <risk-tags> <domain> [api-root]"
        );
        return ExitCode::FAILURE;
    };

    let Ok(company_id) = company_id.parse::<i64>() else {
        eprintln!("company id must be a number, got {company_id}");
        return ExitCode::FAILURE;
    };

    let config = match ClientConfig::from_value(json!({
        "api_key": api_key,
        "api_root": rest.first(),
    })) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let client = CompaniesClient::new(config);

    let tags: Vec<Value> = risk_tags
        .split(',')
        .filter(|tag| !tag.is_empty())
        .map(|tag| Value::String(tag.to_string()))
        .collect();
    let mut properties = Properties::new();
    properties.insert("merchant_id".to_string(), Value::String(merchant_id.clone()));
    properties.insert("company_risk_tag".to_string(), Value::Array(tags));
    properties.insert("domain".to_string(), Value::String(domain.clone()));

    match client.update_company(company_id, &properties) {
        Ok(Some(updated)) => {
            println!("{}", Value::Object(updated));
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("update returned no properties");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
