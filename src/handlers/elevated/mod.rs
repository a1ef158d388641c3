// handlers/elevated/mod.rs - Elevated handlers (admin role required)
//
// Account administration. Routes are mounted under /admin with
// `require_admin_middleware` layered inside `jwt_auth_middleware`, so a valid
// token without the admin role gets 403.
//
// Security Level: Bearer token with role "admin"
// Route Prefix: /admin/*

pub mod users;
