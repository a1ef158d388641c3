// handlers/protected/me/mod.rs - The caller's own account
//
// GET  /users/me          - public view of the caller
// PUT  /users/me          - change email and/or password (current password required)
// GET  /users/me/courts   - courts the caller owns
// GET  /users/me/reviews  - reviews the caller wrote, newest first

pub mod account;
pub mod listings;

pub use account::{me_get, me_put};
pub use listings::{my_courts_get, my_reviews_get};
