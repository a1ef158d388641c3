// handlers/public/courts/mod.rs - Anonymous court reads

pub mod court_get; // GET /courts/:id
pub mod court_list; // GET /courts

pub use court_get::court_get;
pub use court_list::court_list;
