// handlers/protected/courts/court_put.rs - PUT /courts/:id handler

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};

use crate::auth::AuthUser;
use crate::database::models::Court;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CourtRequest;
use crate::state::AppState;

/// PUT /courts/:id - Partial update; supplied fields overwrite, the rest are kept
pub async fn court_put(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<CourtRequest>, JsonRejection>,
) -> ApiResult<Court> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let court = state.courts.update(id, &auth_user, request).await?;
    Ok(ApiResponse::success(court).message("Court updated"))
}
