use crate::ids::new_id;
use crate::storage::entity::program::{
    self, ActiveModel as ProgramActiveModel, Entity as Program, Model as ProgramModel,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

/// Fully-resolved program payload: list fields already split and trimmed.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProgramDefinition {
    pub name: String,
    pub country: String,
    pub duration: String,
    pub price: String,
    pub cities: Vec<String>,
    pub hotels: Vec<String>,
    pub activities: Vec<String>,
    pub includes: Vec<String>,
    pub description: String,
    pub is_available: bool,
    pub category_id: Option<String>,
    pub min_participants: i32,
    pub max_participants: i32,
    pub difficulty_level: String,
    pub season: String,
    pub featured_image: String,
    pub gallery: Vec<String>,
}

/// Read model with every nullable column normalized: JSON list columns
/// default to empty lists, nullable scalars to the form defaults. The wire
/// data may contain NULLs where the screens assume defined values.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProgramDto {
    pub id: String,
    pub name: String,
    pub country: String,
    pub duration: String,
    pub price: String,
    pub cities: Vec<String>,
    pub hotels: Vec<String>,
    pub activities: Vec<String>,
    pub includes: Vec<String>,
    pub description: String,
    pub is_available: bool,
    pub category_id: String,
    pub min_participants: i32,
    pub max_participants: i32,
    pub difficulty_level: String,
    pub season: String,
    pub featured_image: String,
    pub gallery: Vec<String>,
    pub created_at: i64,
}

fn parse_list(raw: &str) -> Vec<String> {
    serde_json::from_str::<Vec<String>>(raw).unwrap_or_default()
}

fn to_json(list: &[String]) -> String {
    serde_json::to_string(list).unwrap_or_else(|_| "[]".to_string())
}

impl From<ProgramModel> for ProgramDto {
    fn from(model: ProgramModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            country: model.country,
            duration: model.duration,
            price: model.price,
            cities: parse_list(&model.cities),
            hotels: parse_list(&model.hotels),
            activities: parse_list(&model.activities),
            includes: parse_list(&model.includes),
            description: model.description.unwrap_or_default(),
            is_available: model.is_available,
            category_id: model.category_id.unwrap_or_default(),
            min_participants: model.min_participants.unwrap_or(1),
            max_participants: model.max_participants.unwrap_or(50),
            difficulty_level: model
                .difficulty_level
                .unwrap_or_else(|| "متوسط".to_string()),
            season: model.season.unwrap_or_default(),
            featured_image: model.featured_image.unwrap_or_default(),
            gallery: parse_list(&model.gallery),
            created_at: model.created_at,
        }
    }
}

pub struct ProgramRepository;

impl ProgramRepository {
    /// All programs, newest first.
    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<ProgramDto>, sea_orm::DbErr> {
        let models = Program::find()
            .order_by_desc(program::Column::CreatedAt)
            .all(db)
            .await?;
        Ok(models.into_iter().map(ProgramDto::from).collect())
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: &str,
    ) -> Result<Option<ProgramDto>, sea_orm::DbErr> {
        let model = Program::find_by_id(id.to_string()).one(db).await?;
        Ok(model.map(ProgramDto::from))
    }

    pub async fn insert(
        db: &DatabaseConnection,
        def: ProgramDefinition,
    ) -> Result<String, sea_orm::DbErr> {
        let id = new_id();
        let now = Utc::now().timestamp();
        let active_model = ProgramActiveModel {
            id: Set(id.clone()),
            name: Set(def.name),
            country: Set(def.country),
            duration: Set(def.duration),
            price: Set(def.price),
            cities: Set(to_json(&def.cities)),
            hotels: Set(to_json(&def.hotels)),
            activities: Set(to_json(&def.activities)),
            includes: Set(to_json(&def.includes)),
            gallery: Set(to_json(&def.gallery)),
            description: Set(Some(def.description)),
            is_available: Set(def.is_available),
            category_id: Set(def.category_id),
            min_participants: Set(Some(def.min_participants)),
            max_participants: Set(Some(def.max_participants)),
            difficulty_level: Set(Some(def.difficulty_level)),
            season: Set(Some(def.season)),
            featured_image: Set(Some(def.featured_image)),
            created_at: Set(now),
        };
        active_model.insert(db).await?;
        Ok(id)
    }

    /// Full-row overwrite: edit forms always resubmit every field.
    pub async fn update(
        db: &DatabaseConnection,
        id: &str,
        def: ProgramDefinition,
    ) -> Result<(), sea_orm::DbErr> {
        let model = Program::find_by_id(id.to_string()).one(db).await?;
        if let Some(model) = model {
            let mut am: ProgramActiveModel = model.into();
            am.name = Set(def.name);
            am.country = Set(def.country);
            am.duration = Set(def.duration);
            am.price = Set(def.price);
            am.cities = Set(to_json(&def.cities));
            am.hotels = Set(to_json(&def.hotels));
            am.activities = Set(to_json(&def.activities));
            am.includes = Set(to_json(&def.includes));
            am.gallery = Set(to_json(&def.gallery));
            am.description = Set(Some(def.description));
            am.is_available = Set(def.is_available);
            am.category_id = Set(def.category_id);
            am.min_participants = Set(Some(def.min_participants));
            am.max_participants = Set(Some(def.max_participants));
            am.difficulty_level = Set(Some(def.difficulty_level));
            am.season = Set(Some(def.season));
            am.featured_image = Set(Some(def.featured_image));
            am.update(db).await?;
        }
        Ok(())
    }

    /// Delete by id; days and tours underneath go with the FK cascade.
    pub async fn delete_by_id(
        db: &DatabaseConnection,
        id: &str,
    ) -> Result<u64, sea_orm::DbErr> {
        let res = Program::delete_many()
            .filter(program::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
