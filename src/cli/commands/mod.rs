pub mod auth;
pub mod courts;
pub mod reviews;
