// handlers/public/mod.rs - Public handlers (no authentication required)
//
// Token acquisition, anonymous court and review reads, and service status.
//
// Security Level: None
// Middleware: request tracing and CORS only

pub mod auth;
pub mod courts;
pub mod reviews;
pub mod status;
