// handlers/public/auth/register.rs - POST /users handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::RegisterRequest;
use crate::state::AppState;

/// POST /users - Register a new account
///
/// Input: `{"name", "email", "password"}`. The name is 4-20 letters, digits
/// or underscores; the email is stored lower-cased. New accounts always get
/// the `user` role.
///
/// Returns 201 with the public user view, 400 for the first invalid field,
/// 409 when the name or email is already registered.
pub async fn register_post(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<User> {
    let Json(request) = payload?;
    let user = state.auth.register(request).await?;
    Ok(ApiResponse::created(user).message("User registered"))
}
