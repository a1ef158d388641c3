// handlers/elevated/users/mod.rs - Account administration

pub mod user_delete; // DELETE /admin/users/:id
pub mod user_list; // GET /admin/users

pub use user_delete::user_delete;
pub use user_list::user_list;
