// handlers/public/auth/login.rs - POST /users/login handler

use axum::{extract::rejection::JsonRejection, extract::State, Json};

use crate::middleware::{ApiResponse, ApiResult};
use crate::services::{LoginRequest, LoginResponse};
use crate::state::AppState;

/// POST /users/login - Authenticate and receive a bearer token
///
/// Expected output:
/// ```json
/// {
///   "data": {
///     "token": "eyJhbGciOiJIUzI1NiI...",
///     "token_type": "Bearer",
///     "expires_in": 3600,
///     "user": { "id": "...", "name": "alice1", "email": "a@x.com", "role": "user" }
///   },
///   "message": "Login successful"
/// }
/// ```
///
/// Unknown email and wrong password both answer 401 "Invalid credentials".
pub async fn login_post(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<LoginResponse> {
    let Json(request) = payload?;
    let session = state.auth.login(request).await?;
    Ok(ApiResponse::success(session).message("Login successful"))
}
