use crate::ids::new_id;
use crate::storage::entity::customer_booking::{
    self, ActiveModel as BookingActiveModel, Entity as CustomerBooking, Model as BookingModel,
};
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookingDefinition {
    pub customer_name: String,
    pub customer_email: String,
    pub phone: String,
    pub program_id: Option<String>,
    pub booking_date: String,
    pub status: String,
    pub notes: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BookingDto {
    pub id: String,
    pub customer_name: String,
    pub customer_email: String,
    pub phone: String,
    pub program_id: String,
    pub booking_date: String,
    pub status: String,
    pub notes: String,
    pub created_at: i64,
}

impl From<BookingModel> for BookingDto {
    fn from(model: BookingModel) -> Self {
        Self {
            id: model.id,
            customer_name: model.customer_name,
            customer_email: model.customer_email,
            phone: model.phone.unwrap_or_default(),
            program_id: model.program_id.unwrap_or_default(),
            booking_date: model.booking_date,
            status: model.status,
            notes: model.notes.unwrap_or_default(),
            created_at: model.created_at,
        }
    }
}

pub struct BookingRepository;

impl BookingRepository {
    /// All bookings newest first, then the screen's filter semantics:
    /// status `"all"` passes everything, the search term matches
    /// case-insensitively against customer name, booking id and program id.
    pub async fn list_filtered(
        db: &DatabaseConnection,
        status: &str,
        search: &str,
    ) -> Result<Vec<BookingDto>, sea_orm::DbErr> {
        let models = CustomerBooking::find()
            .order_by_desc(customer_booking::Column::CreatedAt)
            .all(db)
            .await?;

        let needle = search.to_lowercase();
        Ok(models
            .into_iter()
            .map(BookingDto::from)
            .filter(|b| status == "all" || b.status == status)
            .filter(|b| {
                needle.is_empty()
                    || b.customer_name.to_lowercase().contains(&needle)
                    || b.id.to_lowercase().contains(&needle)
                    || b.program_id.to_lowercase().contains(&needle)
            })
            .collect())
    }

    pub async fn insert(
        db: &DatabaseConnection,
        def: BookingDefinition,
    ) -> Result<String, sea_orm::DbErr> {
        let id = new_id();
        let am = BookingActiveModel {
            id: Set(id.clone()),
            customer_name: Set(def.customer_name),
            customer_email: Set(def.customer_email),
            phone: Set(Some(def.phone)),
            program_id: Set(def.program_id),
            booking_date: Set(def.booking_date),
            status: Set(def.status),
            notes: Set(Some(def.notes)),
            created_at: Set(Utc::now().timestamp()),
        };
        am.insert(db).await?;
        Ok(id)
    }

    pub async fn update(
        db: &DatabaseConnection,
        id: &str,
        def: BookingDefinition,
    ) -> Result<(), sea_orm::DbErr> {
        if let Some(model) = CustomerBooking::find_by_id(id.to_string()).one(db).await? {
            let mut am: BookingActiveModel = model.into();
            am.customer_name = Set(def.customer_name);
            am.customer_email = Set(def.customer_email);
            am.phone = Set(Some(def.phone));
            am.program_id = Set(def.program_id);
            am.booking_date = Set(def.booking_date);
            am.status = Set(def.status);
            am.notes = Set(Some(def.notes));
            am.update(db).await?;
        }
        Ok(())
    }

    pub async fn delete_by_id(db: &DatabaseConnection, id: &str) -> Result<u64, sea_orm::DbErr> {
        let res = CustomerBooking::delete_many()
            .filter(customer_booking::Column::Id.eq(id))
            .exec(db)
            .await?;
        Ok(res.rows_affected)
    }
}
