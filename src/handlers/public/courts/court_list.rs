// handlers/public/courts/court_list.rs - GET /courts handler

use axum::extract::State;

use crate::database::models::Court;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

/// GET /courts - All courts with their rating aggregate, ordered by id
pub async fn court_list(State(state): State<AppState>) -> ApiResult<Vec<Court>> {
    let courts = state.courts.list_all().await?;
    Ok(ApiResponse::success(courts))
}
