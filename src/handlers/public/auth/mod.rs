// handlers/public/auth/mod.rs - Public authentication handlers
//
// Account creation and token acquisition. Both endpoints validate every
// input field since there is no trusted caller context.

pub mod login; // POST /users/login - verify credentials, issue bearer token
pub mod register; // POST /users - create an account

pub use login::login_post;
pub use register::register_post;
