use crate::ids::new_id;
use crate::storage::entity::profile::{
    self, ActiveModel as ProfileActiveModel, Entity as Profile, Model as ProfileModel,
};
use chrono::Utc;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProfileDto {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
    pub is_approved: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<ProfileModel> for ProfileDto {
    fn from(model: ProfileModel) -> Self {
        Self {
            id: model.id,
            email: model.email,
            full_name: model.full_name.unwrap_or_default(),
            role: model.role,
            is_approved: model.is_approved,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

pub struct ProfileRepository;

impl ProfileRepository {
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: &str,
    ) -> Result<Option<ProfileDto>, sea_orm::DbErr> {
        let model = Profile::find_by_id(id.to_string()).one(db).await?;
        Ok(model.map(ProfileDto::from))
    }

    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<ProfileDto>, sea_orm::DbErr> {
        let models = Profile::find()
            .order_by_desc(profile::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(models.into_iter().map(ProfileDto::from).collect())
    }

    /// Registers an account as unapproved; the approval workflow decides
    /// its fate.
    pub async fn insert(
        db: &DatabaseConnection,
        email: String,
        full_name: String,
        role: String,
    ) -> Result<String, sea_orm::DbErr> {
        let id = new_id();
        let now = Utc::now().timestamp();
        let am = ProfileActiveModel {
            id: Set(id.clone()),
            email: Set(email),
            full_name: Set(Some(full_name)),
            role: Set(role),
            is_approved: Set(false),
            created_at: Set(now),
            updated_at: Set(now),
        };
        am.insert(db).await?;
        Ok(id)
    }

    pub async fn set_approved(
        db: &DatabaseConnection,
        id: &str,
        approved: bool,
    ) -> Result<u64, sea_orm::DbErr> {
        let now = Utc::now().timestamp();
        let res = Profile::update_many()
            .col_expr(profile::Column::IsApproved, Expr::value(approved))
            .col_expr(profile::Column::UpdatedAt, Expr::value(now))
            .filter(profile::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Rejection removes the account record outright.
    pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> Result<u64, sea_orm::DbErr> {
        let res = Profile::delete_many()
            .filter(profile::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
