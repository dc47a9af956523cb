use crate::ids::new_id;
use crate::storage::entity::city::{
    self, ActiveModel as CityActiveModel, Entity as City, Model as CityModel,
};
use crate::storage::entity::country::{
    self, ActiveModel as CountryActiveModel, Entity as Country, Model as CountryModel,
};
use crate::storage::entity::program_category::{
    self, ActiveModel as CategoryActiveModel, Entity as ProgramCategory,
    Model as CategoryModel,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CountryDto {
    pub id: String,
    pub name: String,
    pub code: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CityDto {
    pub id: String,
    pub name: String,
    pub country_id: String,
    pub created_at: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CategoryDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub created_at: i64,
}

impl From<CountryModel> for CountryDto {
    fn from(model: CountryModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            code: model.code,
            created_at: model.created_at,
        }
    }
}

impl From<CityModel> for CityDto {
    fn from(model: CityModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            country_id: model.country_id.unwrap_or_default(),
            created_at: model.created_at,
        }
    }
}

impl From<CategoryModel> for CategoryDto {
    fn from(model: CategoryModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description.unwrap_or_default(),
            created_at: model.created_at,
        }
    }
}

pub struct CountryRepository;

impl CountryRepository {
    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<CountryDto>, sea_orm::DbErr> {
        let models = Country::find()
            .order_by_asc(country::Column::Name)
            .all(db)
            .await?;
        Ok(models.into_iter().map(CountryDto::from).collect())
    }

    pub async fn insert(
        db: &DatabaseConnection,
        name: String,
        code: String,
    ) -> Result<String, sea_orm::DbErr> {
        let id = new_id();
        let am = CountryActiveModel {
            id: Set(id.clone()),
            name: Set(name),
            code: Set(code),
            created_at: Set(Utc::now().timestamp()),
        };
        am.insert(db).await?;
        Ok(id)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: &str,
        name: String,
        code: String,
    ) -> Result<(), sea_orm::DbErr> {
        if let Some(model) = Country::find_by_id(id.to_string()).one(db).await? {
            let mut am: CountryActiveModel = model.into();
            am.name = Set(name);
            am.code = Set(code);
            am.update(db).await?;
        }
        Ok(())
    }

    pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> Result<u64, sea_orm::DbErr> {
        let res = Country::delete_many()
            .filter(country::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}

pub struct CityRepository;

impl CityRepository {
    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<CityDto>, sea_orm::DbErr> {
        let models = City::find().order_by_asc(city::Column::Name).all(db).await?;
        Ok(models.into_iter().map(CityDto::from).collect())
    }

    pub async fn list_by_country(
        db: &DatabaseConnection,
        country_id: &str,
    ) -> Result<Vec<CityDto>, sea_orm::DbErr> {
        let models = City::find()
            .filter(city::Column::CountryId.eq(country_id))
            .order_by_asc(city::Column::Name)
            .all(db)
            .await?;
        Ok(models.into_iter().map(CityDto::from).collect())
    }

    pub async fn insert(
        db: &DatabaseConnection,
        name: String,
        country_id: Option<String>,
    ) -> Result<String, sea_orm::DbErr> {
        let id = new_id();
        let am = CityActiveModel {
            id: Set(id.clone()),
            name: Set(name),
            country_id: Set(country_id),
            created_at: Set(Utc::now().timestamp()),
        };
        am.insert(db).await?;
        Ok(id)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: &str,
        name: String,
        country_id: Option<String>,
    ) -> Result<(), sea_orm::DbErr> {
        if let Some(model) = City::find_by_id(id.to_string()).one(db).await? {
            let mut am: CityActiveModel = model.into();
            am.name = Set(name);
            am.country_id = Set(country_id);
            am.update(db).await?;
        }
        Ok(())
    }

    pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> Result<u64, sea_orm::DbErr> {
        let res = City::delete_many()
            .filter(city::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}

pub struct CategoryRepository;

impl CategoryRepository {
    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<CategoryDto>, sea_orm::DbErr> {
        let models = ProgramCategory::find()
            .order_by_asc(program_category::Column::Name)
            .all(db)
            .await?;
        Ok(models.into_iter().map(CategoryDto::from).collect())
    }

    pub async fn insert(
        db: &DatabaseConnection,
        name: String,
        description: String,
    ) -> Result<String, sea_orm::DbErr> {
        let id = new_id();
        let am = CategoryActiveModel {
            id: Set(id.clone()),
            name: Set(name),
            description: Set(Some(description)),
            created_at: Set(Utc::now().timestamp()),
        };
        am.insert(db).await?;
        Ok(id)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: &str,
        name: String,
        description: String,
    ) -> Result<(), sea_orm::DbErr> {
        if let Some(model) = ProgramCategory::find_by_id(id.to_string()).one(db).await? {
            let mut am: CategoryActiveModel = model.into();
            am.name = Set(name);
            am.description = Set(Some(description));
            am.update(db).await?;
        }
        Ok(())
    }

    pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> Result<u64, sea_orm::DbErr> {
        let res = ProgramCategory::delete_many()
            .filter(program_category::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
