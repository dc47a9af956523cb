//! The two approval-workflow endpoints.
//!
//! `POST /send-approval-email` issues a fresh approve/reject token pair,
//! composes the Arabic request email and sends it through the mailer.
//! `GET /approve-user` verifies and consumes the clicked token, then flips
//! `is_approved` or deletes the profile, answering with a full HTML page.

use axum::{
    extract::{Query, State},
    response::Html,
    Json,
};
use log::{error, info};
use serde::Deserialize;
use serde_json::Value;

use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;
use crate::email::{approval_email, ApprovalEmailRequest};
use crate::storage::repository::ProfileRepository;
use crate::token::{self, ApprovalAction, TokenError};

pub async fn send_approval_email(
    State(state): State<AppState>,
    Json(request): Json<ApprovalEmailRequest>,
) -> ApiResult<Json<Value>> {
    let db = state.db.as_ref();

    let approve_token = token::issue(db, &request.user_id, ApprovalAction::Approve)
        .await
        .map_err(|e| {
            error!("issuing approve token failed: {}", e);
            ApiError::Email(e.to_string())
        })?;
    let reject_token = token::issue(db, &request.user_id, ApprovalAction::Reject)
        .await
        .map_err(|e| {
            error!("issuing reject token failed: {}", e);
            ApiError::Email(e.to_string())
        })?;

    let base = &state.config.public_base_url;
    let approve_url = format!(
        "{}/approve-user?user_id={}&token={}",
        base, request.user_id, approve_token
    );
    let reject_url = format!(
        "{}/approve-user?user_id={}&token={}",
        base, request.user_id, reject_token
    );

    let message = approval_email(&state.config.reviewer_email, &request, &approve_url, &reject_url);

    let provider_response = state.mailer.send(message).await.map_err(|e| {
        error!("approval email send failed: {}", e);
        ApiError::Email(e.to_string())
    })?;

    info!("approval email sent for profile {}", request.user_id);
    Ok(Json(provider_response))
}

#[derive(Debug, Deserialize)]
pub struct ApprovalQuery {
    pub user_id: Option<String>,
    pub token: Option<String>,
}

pub async fn approve_user(
    State(state): State<AppState>,
    Query(query): Query<ApprovalQuery>,
) -> ApiResult<Html<String>> {
    let (user_id, raw_token) = match (query.user_id, query.token) {
        (Some(u), Some(t)) => (u, t),
        _ => return Err(ApiError::BadRequest("Missing parameters".to_string())),
    };

    let db = state.db.as_ref();
    let action = match token::consume(db, &user_id, &raw_token).await {
        Ok(action) => action,
        Err(TokenError::Db(e)) => {
            error!("token lookup failed: {}", e);
            return Err(ApiError::Internal("Internal server error".to_string()));
        }
        Err(e) => {
            info!("rejected approval token for {}: {}", user_id, e);
            return Err(ApiError::BadRequest("Invalid token".to_string()));
        }
    };

    match action {
        ApprovalAction::Approve => {
            ProfileRepository::set_approved(db, &user_id, true)
                .await
                .map_err(|e| {
                    error!("Error approving user: {}", e);
                    ApiError::Internal("Error approving user".to_string())
                })?;
            info!("profile {} approved", user_id);
            Ok(Html(approved_page()))
        }
        ApprovalAction::Reject => {
            ProfileRepository::delete_by_id(db, &user_id)
                .await
                .map_err(|e| {
                    error!("Error rejecting user: {}", e);
                    ApiError::Internal("Error rejecting user".to_string())
                })?;
            info!("profile {} rejected and deleted", user_id);
            Ok(Html(rejected_page()))
        }
    }
}

fn approved_page() -> String {
    r#"<html dir="rtl">
  <head>
    <meta charset="UTF-8">
    <title>تمت الموافقة بنجاح</title>
    <style>
      body { font-family: Arial, sans-serif; max-width: 600px; margin: 100px auto; padding: 40px; text-align: center; background: linear-gradient(135deg, #f0fdf4, #dcfce7); border-radius: 10px; }
      .success { color: #059669; font-size: 48px; margin-bottom: 20px; }
      h1 { color: #059669; margin-bottom: 20px; }
      p { color: #374151; font-size: 18px; line-height: 1.6; }
    </style>
  </head>
  <body>
    <div class="success">✅</div>
    <h1>تمت الموافقة بنجاح!</h1>
    <p>تم الموافقة على تسجيل الموظف في النظام.</p>
    <p>يمكن للموظف الآن تسجيل الدخول والعمل في النظام.</p>
  </body>
</html>"#
        .to_string()
}

fn rejected_page() -> String {
    r#"<html dir="rtl">
  <head>
    <meta charset="UTF-8">
    <title>تم رفض التسجيل</title>
    <style>
      body { font-family: Arial, sans-serif; max-width: 600px; margin: 100px auto; padding: 40px; text-align: center; background: linear-gradient(135deg, #fef2f2, #fecaca); border-radius: 10px; }
      .reject { color: #dc2626; font-size: 48px; margin-bottom: 20px; }
      h1 { color: #dc2626; margin-bottom: 20px; }
      p { color: #374151; font-size: 18px; line-height: 1.6; }
    </style>
  </head>
  <body>
    <div class="reject">❌</div>
    <h1>تم رفض التسجيل</h1>
    <p>تم رفض طلب تسجيل الموظف في النظام.</p>
    <p>تم حذف الحساب نهائياً من النظام.</p>
  </body>
</html>"#
        .to_string()
}
