#![allow(dead_code)]

use sea_orm::DatabaseConnection;
use std::sync::Arc;
use tourops::forms::ProgramForm;
use tourops::ids::new_id;
use tourops::session::Session;
use tourops::storage::establish_connection;
use tourops::storage::repository::ProfileDto;

/// Fresh file-backed sqlite store per test, schema already created.
pub async fn test_db() -> Arc<DatabaseConnection> {
    let path = std::env::temp_dir().join(format!("tourops-test-{}.db", new_id()));
    let url = format!("sqlite://{}?mode=rwc", path.display());
    Arc::new(establish_connection(&url).await.expect("test db"))
}

pub fn admin_session() -> Session {
    Session::new(ProfileDto {
        id: "admin-1".to_string(),
        email: "admin@example.com".to_string(),
        full_name: "مدير النظام".to_string(),
        role: "admin".to_string(),
        is_approved: true,
        created_at: 0,
        updated_at: 0,
    })
}

pub fn unapproved_session() -> Session {
    Session::new(ProfileDto {
        id: "emp-1".to_string(),
        email: "emp@example.com".to_string(),
        full_name: "موظف جديد".to_string(),
        role: "employee".to_string(),
        is_approved: false,
        created_at: 0,
        updated_at: 0,
    })
}

/// Minimal valid program form with the given name and raw cities text.
pub fn program_form(name: &str, cities: &str) -> ProgramForm {
    ProgramForm {
        name: name.to_string(),
        country: "تايلاند".to_string(),
        duration: "7 أيام".to_string(),
        price: "3500".to_string(),
        cities: cities.to_string(),
        hotels: "فندق المدينة".to_string(),
        activities: "جولة بحرية".to_string(),
        includes: "الإقامة, الإفطار".to_string(),
        ..Default::default()
    }
}
