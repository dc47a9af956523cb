use crate::ids::new_id;
use crate::storage::entity::approval_token::{
    self, ActiveModel as TokenActiveModel, Entity as ApprovalToken, Model as TokenModel,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

pub struct ApprovalTokenRepository;

impl ApprovalTokenRepository {
    /// Records the sha-256 digest of a freshly minted token. The plaintext
    /// never touches the store.
    pub async fn insert(
        db: &DatabaseConnection,
        profile_id: &str,
        action: &str,
        token_sha256: &str,
        expires_at: i64,
    ) -> Result<String, sea_orm::DbErr> {
        let id = new_id();
        let am = TokenActiveModel {
            id: Set(id.clone()),
            profile_id: Set(profile_id.to_string()),
            action: Set(action.to_string()),
            token_sha256: Set(token_sha256.to_string()),
            expires_at: Set(expires_at),
            used: Set(false),
            created_at: Set(Utc::now().timestamp()),
        };
        am.insert(db).await?;
        Ok(id)
    }

    pub async fn find_by_digest(
        db: &DatabaseConnection,
        token_sha256: &str,
    ) -> Result<Option<TokenModel>, sea_orm::DbErr> {
        ApprovalToken::find()
            .filter(approval_token::Column::TokenSha256.eq(token_sha256))
            .one(db)
            .await
    }

    /// Flips `used` only if it is still false, so exactly one caller wins
    /// when the same token is consumed concurrently. Returns the number of
    /// rows burned (0 means someone else got there first).
    pub async fn mark_used(db: &DatabaseConnection, id: &str) -> Result<u64, sea_orm::DbErr> {
        let res = ApprovalToken::update_many()
            .col_expr(approval_token::Column::Used, Expr::value(true))
            .filter(approval_token::Column::Id.eq(id))
            .filter(approval_token::Column::Used.eq(false))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Housekeeping for tokens past their expiry.
    pub async fn purge_expired(db: &DatabaseConnection) -> Result<u64, sea_orm::DbErr> {
        let now = Utc::now().timestamp();
        let res = ApprovalToken::delete_many()
            .filter(approval_token::Column::ExpiresAt.lt(now))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
