use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An employee/customer account record. New employee registrations stay
/// unapproved until the approval workflow flips `is_approved`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub email: String,
    #[sea_orm(nullable)]
    pub full_name: Option<String>,
    pub role: String,
    pub is_approved: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::approval_token::Entity")]
    ApprovalToken,
}

impl Related<super::approval_token::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ApprovalToken.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
