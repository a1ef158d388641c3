// handlers/public/courts/court_get.rs - GET /courts/:id handler

use axum::extract::{rejection::PathRejection, Path, State};

use crate::database::models::CourtDetail;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /courts/:id - One court plus its reviews, newest first
pub async fn court_get(
    State(state): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<CourtDetail> {
    let Path(id) = id?;
    let detail = state.courts.get_by_id(id).await?;
    Ok(ApiResponse::success(detail))
}
