use axum::{extract::Request, middleware::Next, response::Response};

use crate::auth::AuthUser;
use crate::error::ApiError;

/// Admin gate; must run after `jwt_auth_middleware`
pub async fn require_admin_middleware(request: Request, next: Next) -> Result<Response, ApiError> {
    let auth_user = request
        .extensions()
        .get::<AuthUser>()
        .ok_or_else(|| ApiError::unauthorized("Missing authorization token"))?;

    if !auth_user.role.is_elevated() {
        tracing::warn!("User {} denied access to {}", auth_user.id, request.uri().path());
        return Err(ApiError::forbidden("Administrator access required"));
    }

    Ok(next.run(request).await)
}
