use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One calendar day within a program's itinerary. Owned exclusively by one
/// program; deleting the program cascades here at the store level.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "program_days")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub program_id: String,
    pub day_number: i32,
    pub title: String,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub city_id: Option<String>,
    pub sort_order: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::program::Entity",
        from = "Column::ProgramId",
        to = "super::program::Column::Id",
        on_delete = "Cascade"
    )]
    Program,
    #[sea_orm(
        belongs_to = "super::city::Entity",
        from = "Column::CityId",
        to = "super::city::Column::Id",
        on_delete = "SetNull"
    )]
    City,
    #[sea_orm(has_many = "super::day_tour::Entity")]
    DayTour,
}

impl Related<super::program::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Program.def()
    }
}

impl Related<super::day_tour::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DayTour.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
