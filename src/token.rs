//! Single-use, time-bound approval-link tokens.
//!
//! Each emailed link carries a 256-bit random secret, url-safe base64 on
//! the wire. Only the sha-256 digest is stored, with the target profile,
//! the action and an expiry; consuming a token checks all of that and
//! marks it used in the same call.

use crate::storage::repository::ApprovalTokenRepository;
use base64::Engine;
use chrono::Utc;
use rand::RngCore;
use sea_orm::DatabaseConnection;
use sha2::{Digest, Sha256};
use thiserror::Error;

/// Approval links stay valid for three days.
pub const TOKEN_TTL_SECS: i64 = 72 * 3600;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApprovalAction {
    Approve,
    Reject,
}

impl ApprovalAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Approve => "approve",
            Self::Reject => "reject",
        }
    }
}

#[derive(Error, Debug)]
pub enum TokenError {
    #[error("invalid token")]
    Invalid,
    #[error("token expired")]
    Expired,
    #[error("token already used")]
    Used,
    #[error("token does not match this user")]
    ProfileMismatch,
    #[error(transparent)]
    Db(#[from] sea_orm::DbErr),
}

fn digest(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    let out = hasher.finalize();
    let mut hex = String::with_capacity(64);
    for b in out {
        hex.push_str(&format!("{:02x}", b));
    }
    hex
}

/// Mints a token for one profile/action pair and records its digest.
/// Returns the plaintext for the emailed link; it is not recoverable
/// afterwards.
pub async fn issue(
    db: &DatabaseConnection,
    profile_id: &str,
    action: ApprovalAction,
) -> Result<String, sea_orm::DbErr> {
    let mut secret = [0u8; 32];
    rand::thread_rng().fill_bytes(&mut secret);
    let token = base64::engine::general_purpose::URL_SAFE_NO_PAD.encode(secret);

    let expires_at = Utc::now().timestamp() + TOKEN_TTL_SECS;
    ApprovalTokenRepository::insert(db, profile_id, action.as_str(), &digest(&token), expires_at)
        .await?;
    Ok(token)
}

/// Verifies and consumes a token: it must exist by digest, belong to the
/// given profile, be unexpired and unused. On success the token is burned
/// and its action returned.
pub async fn consume(
    db: &DatabaseConnection,
    profile_id: &str,
    token: &str,
) -> Result<ApprovalAction, TokenError> {
    let record = ApprovalTokenRepository::find_by_digest(db, &digest(token))
        .await?
        .ok_or(TokenError::Invalid)?;

    if record.profile_id != profile_id {
        return Err(TokenError::ProfileMismatch);
    }
    if record.used {
        return Err(TokenError::Used);
    }
    if record.expires_at < Utc::now().timestamp() {
        return Err(TokenError::Expired);
    }

    let action = match record.action.as_str() {
        "approve" => ApprovalAction::Approve,
        "reject" => ApprovalAction::Reject,
        _ => return Err(TokenError::Invalid),
    };

    // 条件更新：并发消费时只有一个赢家
    let burned = ApprovalTokenRepository::mark_used(db, &record.id).await?;
    if burned == 0 {
        return Err(TokenError::Used);
    }
    Ok(action)
}
