// handlers/protected/mod.rs - Protected handlers (bearer token required)
//
// Every route here sits behind `jwt_auth_middleware`, so handlers receive the
// caller as `Extension<AuthUser>`. Ownership checks happen in the services:
// only the owner or an admin may change a court or review.
//
// Security Level: Bearer token
// Middleware: jwt_auth_middleware

pub mod courts; // Court create/update/delete
pub mod me; // The caller's own account, courts and reviews
pub mod reviews; // Review create/update/delete
