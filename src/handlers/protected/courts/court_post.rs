// handlers/protected/courts/court_post.rs - POST /courts handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};

use crate::auth::AuthUser;
use crate::database::models::Court;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::CourtRequest;
use crate::state::AppState;

/// POST /courts - Create a court owned by the caller
///
/// Input: `{"name", "description", "location", "address", "price"?}`.
/// Any `user_id` in the body is ignored.
pub async fn court_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    payload: Result<Json<CourtRequest>, JsonRejection>,
) -> ApiResult<Court> {
    let Json(request) = payload?;
    let court = state.courts.create(&auth_user, request).await?;
    Ok(ApiResponse::created(court).message("Court created"))
}
