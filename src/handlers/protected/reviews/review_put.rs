// handlers/protected/reviews/review_put.rs - PUT /reviews/:id handler

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    Extension, Json,
};

use crate::auth::AuthUser;
use crate::database::models::Review;
use crate::middleware::{ApiResponse, ApiResult};
use crate::services::ReviewRequest;
use crate::state::AppState;

pub async fn review_put(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult<Review> {
    let Path(id) = id?;
    let Json(request) = payload?;
    let review = state.reviews.update(id, &auth_user, request).await?;
    Ok(ApiResponse::success(review).message("Review updated"))
}
