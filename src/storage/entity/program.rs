use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// A sellable multi-day tourism package.
///
/// `country` is a free-text label, deliberately NOT a foreign key into
/// `countries` (the two are maintained independently). The list columns
/// hold JSON arrays of strings.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "programs")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub name: String,
    pub country: String,
    pub duration: String,
    pub price: String,

    // JSON 列
    pub cities: String,
    pub hotels: String,
    pub activities: String,
    pub includes: String,
    pub gallery: String,

    #[sea_orm(nullable)]
    pub description: Option<String>,
    pub is_available: bool,
    #[sea_orm(nullable)]
    pub category_id: Option<String>,
    #[sea_orm(nullable)]
    pub min_participants: Option<i32>,
    #[sea_orm(nullable)]
    pub max_participants: Option<i32>,
    #[sea_orm(nullable)]
    pub difficulty_level: Option<String>,
    #[sea_orm(nullable)]
    pub season: Option<String>,
    #[sea_orm(nullable)]
    pub featured_image: Option<String>,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::program_category::Entity",
        from = "Column::CategoryId",
        to = "super::program_category::Column::Id",
        on_delete = "SetNull"
    )]
    Category,
    #[sea_orm(has_many = "super::program_day::Entity")]
    ProgramDay,
}

impl Related<super::program_category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl Related<super::program_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProgramDay.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
