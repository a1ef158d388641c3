// handlers/protected/me/listings.rs - GET /users/me/courts and /users/me/reviews

use axum::{extract::State, Extension};

use crate::auth::AuthUser;
use crate::database::models::{Court, Review};
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

pub async fn my_courts_get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Court>> {
    let courts = state.courts.list_by_owner(&auth_user).await?;
    Ok(ApiResponse::success(courts))
}

pub async fn my_reviews_get(
    State(state): State<AppState>,
    Extension(auth_user): Extension<AuthUser>,
) -> ApiResult<Vec<Review>> {
    let reviews = state.reviews.list_by_author(&auth_user).await?;
    Ok(ApiResponse::success(reviews))
}
