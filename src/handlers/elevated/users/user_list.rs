// handlers/elevated/users/user_list.rs - GET /admin/users handler

use axum::extract::State;

use crate::database::models::User;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// All accounts, ordered by name
pub async fn user_list(State(state): State<AppState>) -> ApiResult<Vec<User>> {
    let users = state.users.list_users().await?;
    Ok(ApiResponse::success(users))
}
