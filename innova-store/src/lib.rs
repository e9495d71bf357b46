pub mod app_config;
pub mod database;
pub mod room_repo;
pub mod booking_repo;
pub mod review_repo;
pub mod memory;
mod convert;

pub use database::DbClient;
pub use memory::InMemoryStore;
pub use room_repo::MongoRoomRepository;
pub use booking_repo::MongoBookingRepository;
pub use review_repo::MongoReviewRepository;
