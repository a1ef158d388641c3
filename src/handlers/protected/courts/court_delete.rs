// handlers/protected/courts/court_delete.rs - DELETE /courts/:id handler

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension,
};

use crate::auth::AuthUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// DELETE /courts/:id - Remove a court and all of its reviews
pub async fn court_delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state.courts.delete(id, &auth_user).await?;
    Ok(ApiResponse::no_content())
}
