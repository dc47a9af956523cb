pub mod additional_service;
pub mod approval_token;
pub mod city;
pub mod country;
pub mod customer_booking;
pub mod day_tour;
pub mod profile;
pub mod program;
pub mod program_category;
pub mod program_day;
pub mod program_service;

pub use additional_service::Entity as AdditionalService;
pub use approval_token::Entity as ApprovalToken;
pub use city::Entity as City;
pub use country::Entity as Country;
pub use customer_booking::Entity as CustomerBooking;
pub use day_tour::Entity as DayTour;
pub use profile::Entity as Profile;
pub use program::Entity as Program;
pub use program_category::Entity as ProgramCategory;
pub use program_day::Entity as ProgramDay;
pub use program_service::Entity as ProgramService;
