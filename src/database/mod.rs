pub mod courts;
pub mod manager;
pub mod models;
pub mod repository;
pub mod reviews;
pub mod users;

pub use manager::{DatabaseError, DatabaseManager};
pub use repository::{CourtStore, PgRepository, ReviewStore, Store, UserStore};
