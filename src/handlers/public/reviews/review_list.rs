// handlers/public/reviews/review_list.rs - GET /courts/:id/reviews handler

use axum::extract::{rejection::PathRejection, Path, State};

use crate::database::models::Review;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /courts/:id/reviews - Reviews of a court, newest first. 404 if the court is missing.
pub async fn review_list(
    State(state): State<AppState>,
    court_id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Vec<Review>> {
    let Path(court_id) = court_id?;
    let reviews = state.reviews.list_for_court(court_id).await?;
    Ok(ApiResponse::success(reviews))
}
