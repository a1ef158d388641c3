// handlers/protected/reviews/review_delete.rs - DELETE /reviews/:id handler

use axum::{
    extract::{rejection::PathRejection, Path, State},
    Extension,
};

use crate::auth::AuthUser;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn review_delete(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<()> {
    let Path(id) = id?;
    state.reviews.delete(id, &auth_user).await?;
    Ok(ApiResponse::no_content())
}
