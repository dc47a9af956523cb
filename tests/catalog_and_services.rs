mod common;

use common::{program_form, test_db};
use tourops::forms::ServiceType;
use tourops::storage::repository::{
    BookingDefinition, BookingRepository, CategoryRepository, CityRepository, CountryRepository,
    ProgramRepository, ProgramServiceRepository, ServiceDefinition, ServiceRepository,
};

#[tokio::test]
async fn countries_and_cities_list_alphabetically() {
    let db = test_db().await;
    let thailand = CountryRepository::insert(&db, "تايلاند".to_string(), "TH".to_string())
        .await
        .unwrap();
    CountryRepository::insert(&db, "إيطاليا".to_string(), "IT".to_string())
        .await
        .unwrap();

    let countries = CountryRepository::list_all(&db).await.unwrap();
    assert_eq!(countries.len(), 2);
    let names: Vec<&str> = countries.iter().map(|c| c.name.as_str()).collect();
    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);

    CityRepository::insert(&db, "بوكيت".to_string(), Some(thailand.clone()))
        .await
        .unwrap();
    CityRepository::insert(&db, "بانكوك".to_string(), Some(thailand.clone()))
        .await
        .unwrap();
    CityRepository::insert(&db, "روما".to_string(), None).await.unwrap();

    let thai_cities = CityRepository::list_by_country(&db, &thailand).await.unwrap();
    assert_eq!(thai_cities.len(), 2);
    assert!(thai_cities.iter().all(|c| c.country_id == thailand));
    assert_eq!(CityRepository::list_all(&db).await.unwrap().len(), 3);
}

#[tokio::test]
async fn deleting_a_country_detaches_its_cities() {
    let db = test_db().await;
    let country = CountryRepository::insert(&db, "تايلاند".to_string(), "TH".to_string())
        .await
        .unwrap();
    let city = CityRepository::insert(&db, "بانكوك".to_string(), Some(country.clone()))
        .await
        .unwrap();

    CountryRepository::delete_by_id(&db, &country).await.unwrap();

    // المدينة تبقى لكن بلا دولة
    let cities = CityRepository::list_all(&db).await.unwrap();
    assert_eq!(cities.len(), 1);
    assert_eq!(cities[0].id, city);
    assert_eq!(cities[0].country_id, "");
}

#[tokio::test]
async fn category_crud_round_trip() {
    let db = test_db().await;
    let id = CategoryRepository::insert(&db, "شواطئ".to_string(), "برامج بحرية".to_string())
        .await
        .unwrap();

    CategoryRepository::update(&db, &id, "شواطئ وجزر".to_string(), String::new())
        .await
        .unwrap();
    let listed = CategoryRepository::list_all(&db).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].name, "شواطئ وجزر");
    assert_eq!(listed[0].description, "");

    assert_eq!(CategoryRepository::delete_by_id(&db, &id).await.unwrap(), 1);
    assert!(CategoryRepository::list_all(&db).await.unwrap().is_empty());
}

#[tokio::test]
async fn service_round_trips_every_field() {
    let db = test_db().await;
    let id = ServiceRepository::insert(
        &db,
        ServiceDefinition {
            name: "وجبة غداء".to_string(),
            description: "غداء في مطعم محلي".to_string(),
            price: 123.45,
            service_type: ServiceType::Meal,
            is_optional: false,
        },
    )
    .await
    .unwrap();

    let stored = ServiceRepository::find_by_id(&db, &id).await.unwrap().unwrap();
    assert_eq!(stored.name, "وجبة غداء");
    assert_eq!(stored.price, 123.45);
    assert_eq!(stored.service_type, ServiceType::Meal);
    assert!(!stored.is_optional);

    ServiceRepository::update(
        &db,
        &id,
        ServiceDefinition {
            name: "وجبة عشاء".to_string(),
            description: String::new(),
            price: 200.0,
            service_type: ServiceType::Other,
            is_optional: true,
        },
    )
    .await
    .unwrap();
    let updated = ServiceRepository::find_by_id(&db, &id).await.unwrap().unwrap();
    assert_eq!(updated.name, "وجبة عشاء");
    assert_eq!(updated.service_type, ServiceType::Other);
    assert!(updated.is_optional);

    assert_eq!(ServiceRepository::delete_by_id(&db, &id).await.unwrap(), 1);
}

#[tokio::test]
async fn attaching_the_same_service_twice_keeps_one_link() {
    let db = test_db().await;
    let program_id = ProgramRepository::insert(
        &db,
        program_form("برنامج", "بانكوك").into_definition().unwrap(),
    )
    .await
    .unwrap();
    let service_id = ServiceRepository::insert(
        &db,
        ServiceDefinition {
            name: "نقل المطار".to_string(),
            description: String::new(),
            price: 50.0,
            service_type: ServiceType::AirportTransfer,
            is_optional: true,
        },
    )
    .await
    .unwrap();

    ProgramServiceRepository::attach(&db, &program_id, &service_id, true)
        .await
        .unwrap();
    ProgramServiceRepository::attach(&db, &program_id, &service_id, true)
        .await
        .unwrap();

    let links = ProgramServiceRepository::list_for_program(&db, &program_id)
        .await
        .unwrap();
    assert_eq!(links.len(), 1);
    assert!(links[0].is_included);

    ProgramServiceRepository::detach(&db, &program_id, &service_id)
        .await
        .unwrap();
    assert!(ProgramServiceRepository::list_for_program(&db, &program_id)
        .await
        .unwrap()
        .is_empty());
}

fn booking(name: &str, status: &str, program_id: Option<String>) -> BookingDefinition {
    BookingDefinition {
        customer_name: name.to_string(),
        customer_email: "customer@example.com".to_string(),
        phone: "0501234567".to_string(),
        program_id,
        booking_date: "2026-09-01".to_string(),
        status: status.to_string(),
        notes: String::new(),
    }
}

#[tokio::test]
async fn booking_filter_combines_status_and_search() {
    let db = test_db().await;
    BookingRepository::insert(&db, booking("أحمد سالم", "pending", None))
        .await
        .unwrap();
    BookingRepository::insert(&db, booking("سارة خالد", "confirmed", None))
        .await
        .unwrap();
    BookingRepository::insert(&db, booking("أحمد علي", "confirmed", None))
        .await
        .unwrap();

    let all = BookingRepository::list_filtered(&db, "all", "").await.unwrap();
    assert_eq!(all.len(), 3);

    let confirmed = BookingRepository::list_filtered(&db, "confirmed", "")
        .await
        .unwrap();
    assert_eq!(confirmed.len(), 2);

    let confirmed_ahmad = BookingRepository::list_filtered(&db, "confirmed", "أحمد")
        .await
        .unwrap();
    assert_eq!(confirmed_ahmad.len(), 1);
    assert_eq!(confirmed_ahmad[0].customer_name, "أحمد علي");

    let none = BookingRepository::list_filtered(&db, "cancelled", "").await.unwrap();
    assert!(none.is_empty());
}

#[tokio::test]
async fn booking_search_matches_booking_and_program_ids() {
    let db = test_db().await;
    let program_id = ProgramRepository::insert(
        &db,
        program_form("برنامج", "بانكوك").into_definition().unwrap(),
    )
    .await
    .unwrap();
    let booking_id = BookingRepository::insert(&db, booking("عميل", "pending", Some(program_id.clone())))
        .await
        .unwrap();
    BookingRepository::insert(&db, booking("عميل آخر", "pending", None))
        .await
        .unwrap();

    let by_booking_id = BookingRepository::list_filtered(&db, "all", &booking_id)
        .await
        .unwrap();
    assert_eq!(by_booking_id.len(), 1);
    assert_eq!(by_booking_id[0].id, booking_id);

    let by_program_id = BookingRepository::list_filtered(&db, "all", &program_id)
        .await
        .unwrap();
    assert_eq!(by_program_id.len(), 1);
    assert_eq!(by_program_id[0].program_id, program_id);
}

#[tokio::test]
async fn deleting_a_program_nulls_booking_references() {
    let db = test_db().await;
    let program_id = ProgramRepository::insert(
        &db,
        program_form("برنامج", "بانكوك").into_definition().unwrap(),
    )
    .await
    .unwrap();
    let booking_id = BookingRepository::insert(&db, booking("عميل", "pending", Some(program_id.clone())))
        .await
        .unwrap();

    ProgramRepository::delete_by_id(&db, &program_id).await.unwrap();

    let remaining = BookingRepository::list_filtered(&db, "all", "").await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, booking_id);
    assert_eq!(remaining[0].program_id, "");
}
