mod common;

use async_trait::async_trait;
use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::Utc;
use common::test_db;
use sea_orm::DatabaseConnection;
use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::sync::{Arc, Mutex};
use tourops::api::{create_router, ApiConfig, AppState};
use tourops::email::{EmailMessage, Mailer};
use tourops::storage::repository::{ApprovalTokenRepository, ProfileRepository};
use tourops::token::{self, ApprovalAction};

/// Test double: records every message and answers like the provider would.
#[derive(Default)]
struct RecordingMailer {
    sent: Mutex<Vec<EmailMessage>>,
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: EmailMessage) -> anyhow::Result<Value> {
        self.sent.lock().unwrap().push(message);
        Ok(json!({ "id": "re_test_123" }))
    }
}

fn test_config() -> ApiConfig {
    ApiConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        public_base_url: "https://admin.example.com".to_string(),
        reviewer_email: "reviewer@example.com".to_string(),
        enable_cors: false,
    }
}

async fn setup() -> (TestServer, Arc<DatabaseConnection>, Arc<RecordingMailer>) {
    let db = test_db().await;
    let mailer = Arc::new(RecordingMailer::default());
    let state = AppState::new(db.clone(), mailer.clone() as Arc<dyn Mailer>, test_config());
    let server = TestServer::new(create_router(state)).unwrap();
    (server, db, mailer)
}

async fn register_profile(db: &DatabaseConnection) -> String {
    ProfileRepository::insert(
        db,
        "emp@example.com".to_string(),
        "موظف جديد".to_string(),
        "موظف حجوزات".to_string(),
    )
    .await
    .unwrap()
}

fn email_request(user_id: &str) -> Value {
    json!({
        "user_email": "emp@example.com",
        "user_name": "موظف جديد",
        "user_role": "موظف حجوزات",
        "user_id": user_id,
    })
}

/// Pulls the token query values out of the emailed HTML, approve link first.
fn extract_tokens(html: &str) -> Vec<String> {
    html.match_indices("token=")
        .map(|(i, _)| {
            html[i + "token=".len()..]
                .chars()
                .take_while(|c| c.is_ascii_alphanumeric() || *c == '-' || *c == '_')
                .collect()
        })
        .collect()
}

fn sha256_hex(token: &str) -> String {
    let out = Sha256::digest(token.as_bytes());
    out.iter().map(|b| format!("{:02x}", b)).collect()
}

#[tokio::test]
async fn health_check_answers() {
    let (server, _db, _mailer) = setup().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_json(&json!({ "status": "healthy" }));
}

#[tokio::test]
async fn approval_email_carries_working_links() {
    let (server, db, mailer) = setup().await;
    let user_id = register_profile(&db).await;

    let response = server
        .post("/send-approval-email")
        .json(&email_request(&user_id))
        .await;
    response.assert_status_ok();
    let body: Value = response.json();
    assert_eq!(body["id"], "re_test_123");

    let sent = mailer.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    let message = &sent[0];
    assert_eq!(message.to, vec!["reviewer@example.com"]);
    assert!(message.html.contains(&format!(
        "https://admin.example.com/approve-user?user_id={}&token=",
        user_id
    )));
    assert_eq!(extract_tokens(&message.html).len(), 2);
}

#[tokio::test]
async fn approve_link_approves_exactly_once() {
    let (server, db, mailer) = setup().await;
    let user_id = register_profile(&db).await;
    server
        .post("/send-approval-email")
        .json(&email_request(&user_id))
        .await
        .assert_status_ok();
    let approve_token = {
        let sent = mailer.sent.lock().unwrap();
        extract_tokens(&sent[0].html)[0].clone()
    };

    let response = server
        .get("/approve-user")
        .add_query_param("user_id", &user_id)
        .add_query_param("token", &approve_token)
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("تمت الموافقة بنجاح"));

    let profile = ProfileRepository::find_by_id(&db, &user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(profile.is_approved);

    // الرابط يُستهلك من أول نقرة
    let replay = server
        .get("/approve-user")
        .add_query_param("user_id", &user_id)
        .add_query_param("token", &approve_token)
        .await;
    replay.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(replay.text(), "Invalid token");
}

#[tokio::test]
async fn reject_link_deletes_the_profile() {
    let (server, db, mailer) = setup().await;
    let user_id = register_profile(&db).await;
    server
        .post("/send-approval-email")
        .json(&email_request(&user_id))
        .await
        .assert_status_ok();
    let reject_token = {
        let sent = mailer.sent.lock().unwrap();
        extract_tokens(&sent[0].html)[1].clone()
    };

    let response = server
        .get("/approve-user")
        .add_query_param("user_id", &user_id)
        .add_query_param("token", &reject_token)
        .await;
    response.assert_status_ok();
    assert!(response.text().contains("تم رفض التسجيل"));

    assert!(ProfileRepository::find_by_id(&db, &user_id)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn missing_parameters_are_rejected() {
    let (server, _db, _mailer) = setup().await;

    let response = server.get("/approve-user").await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Missing parameters");

    let response = server
        .get("/approve-user")
        .add_query_param("user_id", "someone")
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Missing parameters");
}

#[tokio::test]
async fn unknown_and_guessed_tokens_are_rejected() {
    let (server, db, _mailer) = setup().await;
    let user_id = register_profile(&db).await;

    let legacy_style = format!("approve_{}", user_id);
    for guess in ["garbage", legacy_style.as_str()] {
        let response = server
            .get("/approve-user")
            .add_query_param("user_id", &user_id)
            .add_query_param("token", guess)
            .await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), "Invalid token");
    }

    let profile = ProfileRepository::find_by_id(&db, &user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!profile.is_approved);
}

#[tokio::test]
async fn a_token_issued_for_another_profile_is_rejected() {
    let (server, db, mailer) = setup().await;
    let first = register_profile(&db).await;
    let second = ProfileRepository::insert(
        &db,
        "other@example.com".to_string(),
        "موظف آخر".to_string(),
        "موظف".to_string(),
    )
    .await
    .unwrap();

    server
        .post("/send-approval-email")
        .json(&email_request(&first))
        .await
        .assert_status_ok();
    let approve_token = {
        let sent = mailer.sent.lock().unwrap();
        extract_tokens(&sent[0].html)[0].clone()
    };

    let response = server
        .get("/approve-user")
        .add_query_param("user_id", &second)
        .add_query_param("token", &approve_token)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    let untouched = ProfileRepository::find_by_id(&db, &second)
        .await
        .unwrap()
        .unwrap();
    assert!(!untouched.is_approved);
}

#[tokio::test]
async fn concurrent_clicks_consume_a_token_exactly_once() {
    let (_server, db, _mailer) = setup().await;
    let user_id = register_profile(&db).await;
    let plaintext = token::issue(&db, &user_id, ApprovalAction::Approve)
        .await
        .unwrap();

    let mut handles = Vec::new();
    for _ in 0..4 {
        let db = db.clone();
        let user_id = user_id.clone();
        let plaintext = plaintext.clone();
        handles.push(tokio::spawn(async move {
            token::consume(&db, &user_id, &plaintext).await
        }));
    }

    let mut wins = 0;
    for handle in handles {
        if handle.await.unwrap().is_ok() {
            wins += 1;
        }
    }
    assert_eq!(wins, 1);
}

#[tokio::test]
async fn expired_tokens_are_rejected() {
    let (server, db, _mailer) = setup().await;
    let user_id = register_profile(&db).await;

    let plaintext = "expired-but-otherwise-valid";
    ApprovalTokenRepository::insert(
        &db,
        &user_id,
        "approve",
        &sha256_hex(plaintext),
        Utc::now().timestamp() - 60,
    )
    .await
    .unwrap();

    let response = server
        .get("/approve-user")
        .add_query_param("user_id", &user_id)
        .add_query_param("token", plaintext)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.text(), "Invalid token");

    let profile = ProfileRepository::find_by_id(&db, &user_id)
        .await
        .unwrap()
        .unwrap();
    assert!(!profile.is_approved);
}
