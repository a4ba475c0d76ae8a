pub mod app_config;
pub mod database;
pub mod flight_repo;
pub mod booking_repo;
pub mod user_repo;

pub use database::DbClient;
pub use flight_repo::SqliteFlightRepository;
pub use booking_repo::SqliteBookingRepository;
pub use user_repo::SqliteUserRepository;
