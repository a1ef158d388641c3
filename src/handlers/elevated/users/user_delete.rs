// handlers/elevated/users/user_delete.rs - DELETE /admin/users/:id handler

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension,
};
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// Deletes the account with its reviews, its courts and every review on those
/// courts. An admin cannot delete their own account.
pub async fn user_delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    id: Result<Path<Uuid>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state.users.delete_user(&auth_user, id).await?;
    Ok(ApiResponse::no_content())
}
