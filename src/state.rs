use std::sync::Arc;

use crate::auth::password::PasswordError;
use crate::auth::{PasswordHasher, TokenService};
use crate::config::SecurityConfig;
use crate::database::Store;
use crate::services::{AuthService, CourtService, ReviewService, UserService};

/// Shared handler state, built once at startup and read-only afterwards
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub courts: Arc<CourtService>,
    pub reviews: Arc<ReviewService>,
    pub users: Arc<UserService>,
    pub store: Arc<dyn Store>,
}

impl AppState {
    pub fn new(store: Arc<dyn Store>, security: &SecurityConfig) -> Result<Self, PasswordError> {
        let tokens = Arc::new(TokenService::from_config(security));
        let passwords = PasswordHasher::from_config(security)?;
        let strong = security.require_strong_passwords;

        Ok(Self {
            auth: Arc::new(AuthService::new(store.clone(), tokens, passwords.clone(), strong)),
            courts: Arc::new(CourtService::new(store.clone())),
            reviews: Arc::new(ReviewService::new(store.clone())),
            users: Arc::new(UserService::new(store.clone(), passwords, strong)),
            store,
        })
    }
}
