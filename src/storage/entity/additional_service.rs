use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// An add-on sellable independent of a specific program:
/// transfer, meal, ticket or other.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "additional_services")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    pub price: f64,
    pub service_type: String,
    pub is_optional: bool,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::program_service::Entity")]
    ProgramService,
}

impl Related<super::program_service::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProgramService.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
