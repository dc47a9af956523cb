use std::sync::Arc;

use tourops::api::{run_server, ApiConfig, AppState};
use tourops::email::ResendMailer;
use tourops::storage;

#[tokio::main(flavor = "multi_thread")]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .filter_module("tourops", log::LevelFilter::Info)
        .filter_module("sqlx", log::LevelFilter::Error)
        .filter_module("sea_orm", log::LevelFilter::Error)
        .init();

    let db_url =
        std::env::var("DATABASE_URL").unwrap_or_else(|_| "sqlite://tourops.db?mode=rwc".to_string());
    let db = Arc::new(storage::establish_connection(&db_url).await?);

    let api_key = std::env::var("RESEND_API_KEY").unwrap_or_default();
    if api_key.is_empty() {
        log::warn!("RESEND_API_KEY is not set; approval emails will be rejected by the provider");
    }
    let mailer = Arc::new(ResendMailer::new(api_key));

    let config = ApiConfig::from_env();
    let state = AppState::new(db, mailer, config);

    run_server(state).await
}
