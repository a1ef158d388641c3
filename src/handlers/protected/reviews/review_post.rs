// handlers/protected/reviews/review_post.rs - POST /courts/:id/reviews handler

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

/// POST /courts/:id/reviews - Review a court as the caller
///
/// Input: `{"rating": 1..=5, "comment"}`. 404 when the court does not exist.
pub async fn review_post(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
    court_id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<ReviewRequest>, JsonRejection>,
) -> ApiResult<Review> {
    let Path(court_id) = court_id?;
    let Json(request) = payload?;
    let review = state.reviews.create(court_id, &auth_user, request).await?;
    Ok(ApiResponse::created(review).message("Review created"))
}
