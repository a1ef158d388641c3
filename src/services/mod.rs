pub mod auth_service;
pub mod court_service;
pub mod review_service;
pub mod user_service;
pub mod validation;

pub use auth_service::{AuthService, LoginRequest, LoginResponse, RegisterRequest};
pub use court_service::{CourtRequest, CourtService};
pub use review_service::{ReviewRequest, ReviewService};
pub use user_service::{UpdateProfileRequest, UserService};

use uuid::Uuid;

use crate::auth::AuthUser;
use crate::error::ApiError;

/// Ownership gate for mutations: the owner or an admin passes, anyone else is Forbidden
pub(crate) fn ensure_can_modify(actor: &AuthUser, owner: Uuid, resource: &str, id: i64) -> Result<(), ApiError> {
    if actor.can_modify(owner) {
        return Ok(());
    }
    tracing::warn!(
        "User {} ({}) denied modification of {} {} owned by {}",
        actor.id, actor.role, resource, id, owner
    );
    Err(ApiError::forbidden(format!("You do not have permission to modify this {}", resource)))
}
