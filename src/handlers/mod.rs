// handlers/mod.rs - 3-tier handler layout
//
// Public (no auth) → Protected (bearer token) → Elevated (bearer token with admin role)
//
// Each tier is mounted by `app::app` with its own middleware stack.
pub mod elevated; // Tier 3: admin role required (/admin/*)
pub mod protected; // Tier 2: bearer token required
pub mod public; // Tier 1: no authentication
