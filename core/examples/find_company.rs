//! Look up a company by merchant id.
//!
//! ```text
//! cargo run -p hubspot-core --example find_company -- <api-key> <merchant-id> [api-root]
//! ```

use std::process::ExitCode;

use hubspot_core::{ClientConfig, CompaniesClient, Properties};
use serde_json::Value;

fn main() -> ExitCode {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let [api_key, merchant_id, rest @ ..] = args.as_slice() else {
        eprintln!("usage: find_company <api-key> <merchant-id> [api-root]");
        return ExitCode::FAILURE;
    };

    let config = match ClientConfig::new(api_key.as_str()) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{err}");
            return ExitCode::FAILURE;
        }
    };
    let config = match rest.first() {
        Some(root) => config.with_api_root(root),
        None => config,
    };
    let client = CompaniesClient::new(config);

    let mut filter = Properties::new();
    filter.insert("merchant_id".to_string(), Value::String(merchant_id.clone()));

    match client.find_company(&filter) {
        Ok(Some(id)) => {
            println!("found company {id}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("no company with merchant_id {merchant_id}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}
