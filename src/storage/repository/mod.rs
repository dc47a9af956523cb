pub mod approval_token_repo;
pub mod booking_repo;
pub mod catalog_repo;
pub mod itinerary_repo;
pub mod profile_repo;
pub mod program_repo;
pub mod service_repo;

pub use approval_token_repo::ApprovalTokenRepository;
pub use booking_repo::{BookingDefinition, BookingDto, BookingRepository};
pub use catalog_repo::{
    CategoryDto, CategoryRepository, CityDto, CityRepository, CountryDto, CountryRepository,
};
pub use itinerary_repo::{
    DayDefinition, DayDto, ItineraryRepository, TourDefinition, TourDto,
};
pub use profile_repo::{ProfileDto, ProfileRepository};
pub use program_repo::{ProgramDefinition, ProgramDto, ProgramRepository};
pub use service_repo::{
    ProgramServiceDto, ProgramServiceRepository, ServiceDefinition, ServiceDto, ServiceRepository,
};
