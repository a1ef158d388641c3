// handlers/protected/reviews/mod.rs - Review mutations

pub mod review_delete; // DELETE /reviews/:id
pub mod review_post; // POST /courts/:id/reviews
pub mod review_put; // PUT /reviews/:id

pub use review_delete::review_delete;
pub use review_post::review_post;
pub use review_put::review_put;
