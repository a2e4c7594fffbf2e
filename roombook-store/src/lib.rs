pub mod app_config;
pub mod database;
pub mod booking_repo;
pub mod memory_repo;

pub use database::DbClient;
pub use booking_repo::MongoBookingRepository;
pub use memory_repo::InMemoryBookingRepository;
