use crate::email::Mailer;
use sea_orm::DatabaseConnection;
use std::sync::Arc;

/// Approval-surface configuration.
#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    /// Base URL the emailed links point back at.
    pub public_base_url: String,
    /// Inbox that receives the approval requests.
    pub reviewer_email: String,
    pub enable_cors: bool,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
        let port = std::env::var("PORT")
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(8080);
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| format!("http://{}:{}", host, port));
        let reviewer_email =
            std::env::var("REVIEWER_EMAIL").unwrap_or_else(|_| "klidmorre@gmail.com".to_string());
        Self {
            host,
            port,
            public_base_url,
            reviewer_email,
            enable_cors: true,
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: Arc<DatabaseConnection>,
    pub mailer: Arc<dyn Mailer>,
    pub config: Arc<ApiConfig>,
}

impl AppState {
    pub fn new(db: Arc<DatabaseConnection>, mailer: Arc<dyn Mailer>, config: ApiConfig) -> Self {
        Self {
            db,
            mailer,
            config: Arc::new(config),
        }
    }
}
