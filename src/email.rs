//! Transactional approval email, sent through the Resend HTTP API.

use anyhow::anyhow;
use async_trait::async_trait;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::Value;

const RESEND_EMAILS_URL: &str = "https://api.resend.com/emails";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApprovalEmailRequest {
    pub user_email: String,
    pub user_name: String,
    pub user_role: String,
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailMessage {
    pub from: String,
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
}

/// Seam for the email provider so the HTTP surface can be tested with a
/// recording double.
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Sends one message and returns the provider's response JSON.
    async fn send(&self, message: EmailMessage) -> anyhow::Result<Value>;
}

/// Resend client.
pub struct ResendMailer {
    client: reqwest::Client,
    api_key: String,
}

impl ResendMailer {
    pub fn new(api_key: String) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key,
        }
    }
}

#[async_trait]
impl Mailer for ResendMailer {
    async fn send(&self, message: EmailMessage) -> anyhow::Result<Value> {
        let resp = self
            .client
            .post(RESEND_EMAILS_URL)
            .bearer_auth(&self.api_key)
            .json(&message)
            .send()
            .await?;

        let status = resp.status();
        let body: Value = resp.json().await?;
        info!("{} send(...) [{}]", self, status);

        if !status.is_success() {
            return Err(anyhow!("email provider returned {}: {}", status, body));
        }
        Ok(body)
    }
}

impl std::fmt::Display for ResendMailer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "<ResendMailer>")
    }
}

/// Composes the Arabic approval-request email with one approve link and
/// one reject link.
pub fn approval_email(
    reviewer_address: &str,
    request: &ApprovalEmailRequest,
    approve_url: &str,
    reject_url: &str,
) -> EmailMessage {
    let registered_at = chrono::Local::now().format("%Y-%m-%d %H:%M").to_string();
    let html = format!(
        r#"<div dir="rtl" style="font-family: Arial, sans-serif; max-width: 600px; margin: 0 auto; padding: 20px;">
  <div style="background: linear-gradient(135deg, #059669, #10B981); color: white; padding: 30px; border-radius: 10px; text-align: center; margin-bottom: 30px;">
    <h1 style="margin: 0; font-size: 24px;">🌍 نظام إدارة السياحة</h1>
    <p style="margin: 10px 0 0 0; opacity: 0.9;">طلب موافقة على تسجيل موظف جديد</p>
  </div>
  <div style="background: #f8fafc; padding: 25px; border-radius: 10px; margin-bottom: 25px;">
    <h2 style="color: #059669; margin-top: 0;">تفاصيل الموظف:</h2>
    <div style="background: white; padding: 20px; border-radius: 8px; border-right: 4px solid #059669;">
      <p style="margin: 5px 0;"><strong>الاسم:</strong> {user_name}</p>
      <p style="margin: 5px 0;"><strong>البريد الإلكتروني:</strong> {user_email}</p>
      <p style="margin: 5px 0;"><strong>المنصب المطلوب:</strong> {user_role}</p>
      <p style="margin: 5px 0;"><strong>تاريخ التسجيل:</strong> {registered_at}</p>
    </div>
  </div>
  <div style="text-align: center; margin: 30px 0;">
    <p style="color: #374151; margin-bottom: 20px;">يرجى مراجعة الطلب واتخاذ الإجراء المناسب:</p>
    <div style="display: inline-block; margin: 0 10px;">
      <a href="{approve_url}" style="background: linear-gradient(135deg, #059669, #10B981); color: white; padding: 12px 30px; text-decoration: none; border-radius: 6px; font-weight: bold; display: inline-block; margin: 5px;">✅ الموافقة على التسجيل</a>
    </div>
    <div style="display: inline-block; margin: 0 10px;">
      <a href="{reject_url}" style="background: linear-gradient(135deg, #dc2626, #ef4444); color: white; padding: 12px 30px; text-decoration: none; border-radius: 6px; font-weight: bold; display: inline-block; margin: 5px;">❌ رفض التسجيل</a>
    </div>
  </div>
  <div style="background: #fef3c7; padding: 15px; border-radius: 8px; border-right: 4px solid #f59e0b; margin: 20px 0;">
    <p style="margin: 0; color: #92400e; font-size: 14px;"><strong>ملاحظة:</strong> بعد الموافقة، سيتمكن الموظف من الدخول إلى النظام والعمل وفقاً لصلاحيات منصبه. تنتهي صلاحية الروابط بعد ٧٢ ساعة ولا تصلح إلا لمرة واحدة.</p>
  </div>
</div>"#,
        user_name = request.user_name,
        user_email = request.user_email,
        user_role = request.user_role,
        registered_at = registered_at,
        approve_url = approve_url,
        reject_url = reject_url,
    );

    EmailMessage {
        from: "نظام إدارة السياحة <onboarding@resend.dev>".to_string(),
        to: vec![reviewer_address.to_string()],
        subject: "طلب موافقة على تسجيل موظف جديد".to_string(),
        html,
    }
}
