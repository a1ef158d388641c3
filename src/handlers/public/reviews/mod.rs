// handlers/public/reviews/mod.rs - Anonymous review reads

pub mod review_list; // GET /courts/:id/reviews

pub use review_list::review_list;
