// handlers/protected/me/account.rs - GET and PUT /users/me

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::auth::AuthUser;
use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::UpdateProfileRequest;
use crate::state::AppState;

/// 404 if the account was deleted after the token was issued
pub async fn me_get(State(state): State<AppState>, Extension(auth_user): Extension<AuthUser>) -> ApiResult<User> {
    let user = state.users.me(&auth_user).await?;
    Ok(ApiResponse::success(user))
}

/// Input: `{"current_password", "email"?, "new_password"?}`
pub async fn me_put(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<UpdateProfileRequest>, JsonRejection>,
) -> ApiResult<User> {
    let Json(request) = payload?;
    let user = state.users.update_credentials(&auth_user, request).await?;
    Ok(ApiResponse::success(user).message("Account updated"))
}
