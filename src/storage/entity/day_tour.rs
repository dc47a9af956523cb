use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// One scheduled activity within a program day. `start_time`/`end_time`
/// are free time-of-day strings with no timezone. `images` is a JSON array
/// of URL strings.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "day_tours")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    pub day_id: String,
    pub title: String,
    #[sea_orm(nullable)]
    pub description: Option<String>,
    #[sea_orm(nullable)]
    pub start_time: Option<String>,
    #[sea_orm(nullable)]
    pub end_time: Option<String>,
    #[sea_orm(nullable)]
    pub location: Option<String>,
    #[sea_orm(nullable)]
    pub activity_type: Option<String>,
    pub images: String,
    #[sea_orm(nullable)]
    pub notes: Option<String>,
    pub sort_order: i32,
    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::program_day::Entity",
        from = "Column::DayId",
        to = "super::program_day::Column::Id",
        on_delete = "Cascade"
    )]
    ProgramDay,
}

impl Related<super::program_day::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ProgramDay.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
