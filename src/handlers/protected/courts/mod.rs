// handlers/protected/courts/mod.rs - Court mutations

pub mod court_delete; // DELETE /courts/:id
pub mod court_post; // POST /courts
pub mod court_put; // PUT /courts/:id

pub use court_delete::court_delete;
pub use court_post::court_post;
pub use court_put::court_put;
