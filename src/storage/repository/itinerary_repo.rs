use crate::ids::new_id;
use crate::storage::entity::day_tour::{
    self, ActiveModel as TourActiveModel, Entity as DayTour, Model as TourModel,
};
use crate::storage::entity::program_day::{
    self, ActiveModel as DayActiveModel, Entity as ProgramDay, Model as DayModel,
};
use chrono::Utc;
use futures::stream::{self, StreamExt, TryStreamExt};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

/// Cap on concurrent per-day tour queries during the nested fetch.
/// Keeps the fan-out bounded at large day counts.
const TOUR_FETCH_CONCURRENCY: usize = 8;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayDefinition {
    pub day_number: i32,
    pub title: String,
    pub description: String,
    pub city_id: Option<String>,
    /// The editor sets this from the same user-entered integer as
    /// `day_number`.
    pub sort_order: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TourDefinition {
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub activity_type: String,
    pub images: Vec<String>,
    pub notes: String,
    /// Auto-assigned on create (current count + 1), accepted on edit.
    pub sort_order: Option<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TourDto {
    pub id: String,
    pub day_id: String,
    pub title: String,
    pub description: String,
    pub start_time: String,
    pub end_time: String,
    pub location: String,
    pub activity_type: String,
    pub images: Vec<String>,
    pub notes: String,
    pub sort_order: i32,
    pub created_at: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct DayDto {
    pub id: String,
    pub program_id: String,
    pub day_number: i32,
    pub title: String,
    pub description: String,
    pub city_id: String,
    pub sort_order: i32,
    pub created_at: i64,
    pub tours: Vec<TourDto>,
}

impl From<TourModel> for TourDto {
    fn from(model: TourModel) -> Self {
        Self {
            id: model.id,
            day_id: model.day_id,
            title: model.title,
            description: model.description.unwrap_or_default(),
            start_time: model.start_time.unwrap_or_default(),
            end_time: model.end_time.unwrap_or_default(),
            location: model.location.unwrap_or_default(),
            activity_type: model.activity_type.unwrap_or_default(),
            images: serde_json::from_str(&model.images).unwrap_or_default(),
            notes: model.notes.unwrap_or_default(),
            sort_order: model.sort_order,
            created_at: model.created_at,
        }
    }
}

fn day_dto(model: DayModel, tours: Vec<TourDto>) -> DayDto {
    DayDto {
        id: model.id,
        program_id: model.program_id,
        day_number: model.day_number,
        title: model.title,
        description: model.description.unwrap_or_default(),
        city_id: model.city_id.unwrap_or_default(),
        sort_order: model.sort_order,
        created_at: model.created_at,
        tours,
    }
}

pub struct ItineraryRepository;

impl ItineraryRepository {
    /// Days of one program ordered by day_number, each carrying its tours
    /// ordered by sort_order. The per-day tour queries run concurrently but
    /// bounded; any failure aborts the whole refresh so callers never see a
    /// partially updated list.
    pub async fn list_days_with_tours(
        db: &DatabaseConnection,
        program_id: &str,
    ) -> Result<Vec<DayDto>, sea_orm::DbErr> {
        let days = ProgramDay::find()
            .filter(program_day::Column::ProgramId.eq(program_id))
            .order_by_asc(program_day::Column::DayNumber)
            .all(db)
            .await?;

        let dtos: Vec<DayDto> = stream::iter(days.into_iter().map(|day| async move {
            let tours = Self::list_tours(db, &day.id).await?;
            Ok::<DayDto, sea_orm::DbErr>(day_dto(day, tours))
        }))
        .buffered(TOUR_FETCH_CONCURRENCY)
        .try_collect()
        .await?;

        Ok(dtos)
    }

    pub async fn list_tours(
        db: &DatabaseConnection,
        day_id: &str,
    ) -> Result<Vec<TourDto>, sea_orm::DbErr> {
        let models = DayTour::find()
            .filter(day_tour::Column::DayId.eq(day_id))
            .order_by_asc(day_tour::Column::SortOrder)
            .all(db)
            .await?;
        Ok(models.into_iter().map(TourDto::from).collect())
    }

    /// Seed for a new day's number: current count + 1. Nothing enforces
    /// uniqueness, so manual edits can still produce duplicates or gaps.
    pub async fn next_day_number(
        db: &DatabaseConnection,
        program_id: &str,
    ) -> Result<i32, sea_orm::DbErr> {
        let count = ProgramDay::find()
            .filter(program_day::Column::ProgramId.eq(program_id))
            .count(db)
            .await?;
        Ok(i32::try_from(count + 1).unwrap_or(i32::MAX))
    }

    pub async fn insert_day(
        db: &DatabaseConnection,
        program_id: &str,
        def: DayDefinition,
    ) -> Result<String, sea_orm::DbErr> {
        let id = new_id();
        let now = Utc::now().timestamp();
        let am = DayActiveModel {
            id: Set(id.clone()),
            program_id: Set(program_id.to_string()),
            day_number: Set(def.day_number),
            title: Set(def.title),
            description: Set(Some(def.description)),
            city_id: Set(def.city_id),
            sort_order: Set(def.sort_order),
            created_at: Set(now),
        };
        am.insert(db).await?;
        Ok(id)
    }

    pub async fn update_day(
        db: &DatabaseConnection,
        id: &str,
        def: DayDefinition,
    ) -> Result<(), sea_orm::DbErr> {
        let model = ProgramDay::find_by_id(id.to_string()).one(db).await?;
        if let Some(model) = model {
            let mut am: DayActiveModel = model.into();
            am.day_number = Set(def.day_number);
            am.title = Set(def.title);
            am.description = Set(Some(def.description));
            am.city_id = Set(def.city_id);
            am.sort_order = Set(def.sort_order);
            am.update(db).await?;
        }
        Ok(())
    }

    pub async fn delete_day(db: &DatabaseConnection, id: &str) -> Result<u64, sea_orm::DbErr> {
        let res = ProgramDay::delete_many()
            .filter(program_day::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn insert_tour(
        db: &DatabaseConnection,
        day_id: &str,
        def: TourDefinition,
    ) -> Result<String, sea_orm::DbErr> {
        let sort_order = match def.sort_order {
            Some(n) => n,
            None => {
                // 自动编号：当前数量 + 1，删除后不重排
                let count = DayTour::find()
                    .filter(day_tour::Column::DayId.eq(day_id))
                    .count(db)
                    .await?;
                i32::try_from(count + 1).unwrap_or(i32::MAX)
            }
        };
        let id = new_id();
        let now = Utc::now().timestamp();
        let am = TourActiveModel {
            id: Set(id.clone()),
            day_id: Set(day_id.to_string()),
            title: Set(def.title),
            description: Set(Some(def.description)),
            start_time: Set(Some(def.start_time)),
            end_time: Set(Some(def.end_time)),
            location: Set(Some(def.location)),
            activity_type: Set(Some(def.activity_type)),
            images: Set(serde_json::to_string(&def.images).unwrap_or_else(|_| "[]".to_string())),
            notes: Set(Some(def.notes)),
            sort_order: Set(sort_order),
            created_at: Set(now),
        };
        am.insert(db).await?;
        Ok(id)
    }

    pub async fn update_tour(
        db: &DatabaseConnection,
        id: &str,
        def: TourDefinition,
    ) -> Result<(), sea_orm::DbErr> {
        let model = DayTour::find_by_id(id.to_string()).one(db).await?;
        if let Some(model) = model {
            let keep = model.sort_order;
            let mut am: TourActiveModel = model.into();
            am.title = Set(def.title);
            am.description = Set(Some(def.description));
            am.start_time = Set(Some(def.start_time));
            am.end_time = Set(Some(def.end_time));
            am.location = Set(Some(def.location));
            am.activity_type = Set(Some(def.activity_type));
            am.images =
                Set(serde_json::to_string(&def.images).unwrap_or_else(|_| "[]".to_string()));
            am.notes = Set(Some(def.notes));
            am.sort_order = Set(def.sort_order.unwrap_or(keep));
            am.update(db).await?;
        }
        Ok(())
    }

    pub async fn delete_tour(db: &DatabaseConnection, id: &str) -> Result<u64, sea_orm::DbErr> {
        let res = DayTour::delete_many()
            .filter(day_tour::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    /// Raw day count for a program, used by cascade checks and tests.
    pub async fn count_days(
        db: &DatabaseConnection,
        program_id: &str,
    ) -> Result<u64, sea_orm::DbErr> {
        ProgramDay::find()
            .filter(program_day::Column::ProgramId.eq(program_id))
            .count(db)
            .await
    }

    pub async fn count_tours(
        db: &DatabaseConnection,
        day_id: &str,
    ) -> Result<u64, sea_orm::DbErr> {
        DayTour::find()
            .filter(day_tour::Column::DayId.eq(day_id))
            .count(db)
            .await
    }
}
