use crate::forms::ServiceType;
use crate::ids::new_id;
use crate::storage::entity::additional_service::{
    self, ActiveModel as ServiceActiveModel, Entity as AdditionalService, Model as ServiceModel,
};
use crate::storage::entity::program_service::{
    self, ActiveModel as LinkActiveModel, Entity as ProgramServiceLink,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServiceDefinition {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub service_type: ServiceType,
    pub is_optional: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ServiceDto {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: f64,
    pub service_type: ServiceType,
    pub is_optional: bool,
    pub created_at: i64,
}

impl From<ServiceModel> for ServiceDto {
    fn from(model: ServiceModel) -> Self {
        Self {
            id: model.id,
            name: model.name,
            description: model.description.unwrap_or_default(),
            price: model.price,
            service_type: ServiceType::parse(&model.service_type),
            is_optional: model.is_optional,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ProgramServiceDto {
    pub id: String,
    pub program_id: String,
    pub service_id: String,
    pub is_included: bool,
}

pub struct ServiceRepository;

impl ServiceRepository {
    pub async fn list_all(db: &DatabaseConnection) -> Result<Vec<ServiceDto>, sea_orm::DbErr> {
        let models = AdditionalService::find()
            .order_by_asc(additional_service::Column::Name)
            .all(db)
            .await?;
        Ok(models.into_iter().map(ServiceDto::from).collect())
    }

    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: &str,
    ) -> Result<Option<ServiceDto>, sea_orm::DbErr> {
        let model = AdditionalService::find_by_id(id.to_string()).one(db).await?;
        Ok(model.map(ServiceDto::from))
    }

    pub async fn insert(
        db: &DatabaseConnection,
        def: ServiceDefinition,
    ) -> Result<String, sea_orm::DbErr> {
        let id = new_id();
        let am = ServiceActiveModel {
            id: Set(id.clone()),
            name: Set(def.name),
            description: Set(Some(def.description)),
            price: Set(def.price),
            service_type: Set(def.service_type.as_str().to_string()),
            is_optional: Set(def.is_optional),
            created_at: Set(Utc::now().timestamp()),
        };
        am.insert(db).await?;
        Ok(id)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: &str,
        def: ServiceDefinition,
    ) -> Result<(), sea_orm::DbErr> {
        if let Some(model) = AdditionalService::find_by_id(id.to_string()).one(db).await? {
            let mut am: ServiceActiveModel = model.into();
            am.name = Set(def.name);
            am.description = Set(Some(def.description));
            am.price = Set(def.price);
            am.service_type = Set(def.service_type.as_str().to_string());
            am.is_optional = Set(def.is_optional);
            am.update(db).await?;
        }
        Ok(())
    }

    pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> Result<u64, sea_orm::DbErr> {
        let res = AdditionalService::delete_many()
            .filter(additional_service::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}

/// The program↔service join table. No screen in scope drives it, but the
/// schema carries it and bundled/optional add-ons hang off it.
pub struct ProgramServiceRepository;

impl ProgramServiceRepository {
    /// Idempotent: a second attach of the same pair is a no-op thanks to
    /// the unique (program_id, service_id) index.
    pub async fn attach(
        db: &DatabaseConnection,
        program_id: &str,
        service_id: &str,
        is_included: bool,
    ) -> Result<(), sea_orm::DbErr> {
        let am = LinkActiveModel {
            id: Set(new_id()),
            program_id: Set(program_id.to_string()),
            service_id: Set(service_id.to_string()),
            is_included: Set(is_included),
            created_at: Set(Utc::now().timestamp()),
        };
        ProgramServiceLink::insert(am)
            .on_conflict(
                sea_orm::sea_query::OnConflict::columns([
                    program_service::Column::ProgramId,
                    program_service::Column::ServiceId,
                ])
                .do_nothing()
                .to_owned(),
            )
            .do_nothing()
            .exec(db)
            .await?;
        Ok(())
    }

    pub async fn detach(
        db: &DatabaseConnection,
        program_id: &str,
        service_id: &str,
    ) -> Result<u64, sea_orm::DbErr> {
        let res = ProgramServiceLink::delete_many()
            .filter(program_service::Column::ProgramId.eq(program_id))
            .filter(program_service::Column::ServiceId.eq(service_id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }

    pub async fn list_for_program(
        db: &DatabaseConnection,
        program_id: &str,
    ) -> Result<Vec<ProgramServiceDto>, sea_orm::DbErr> {
        let models = ProgramServiceLink::find()
            .filter(program_service::Column::ProgramId.eq(program_id))
            .all(db)
            .await?;
        Ok(models
            .into_iter()
            .map(|m| ProgramServiceDto {
                id: m.id,
                program_id: m.program_id,
                service_id: m.service_id,
                is_included: m.is_included,
            })
            .collect())
    }
}
