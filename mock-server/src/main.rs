use mock_server::{AppState, Company};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let api_key = std::env::var("HAPIKEY").unwrap_or_else(|_| "demo-key".to_string());
    let addr = format!("127.0.0.1:{port}");

    let state = AppState::new(
        &api_key,
        vec![Company::new(
            101,
            &[("merchant_id", "42"), ("domain", "example.com"), ("company_risk_tag", "low")],
        )],
    );

    let listener = TcpListener::bind(&addr).await?;
    log::info!("listening on {addr}");
    mock_server::run(listener, state).await
}
