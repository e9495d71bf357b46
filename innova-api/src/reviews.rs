use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use innova_core::models::{Document, Review};
use innova_core::outcome::InsertOutcome;

use crate::{error::AppError, state::AppState};

pub fn routes() -> Router<AppState> {
    Router::new().route("/review", get(list_reviews).post(create_review))
}

/// POST /review
async fn create_review(
    State(state): State<AppState>,
    Json(review): Json<Document>,
) -> Result<Json<InsertOutcome>, AppError> {
    Ok(Json(state.reviews.create_review(review).await?))
}

/// GET /review
/// Testimonials, newest first.
async fn list_reviews(State(state): State<AppState>) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(state.reviews.list_reviews().await?))
}
